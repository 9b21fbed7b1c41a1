//! The [`Cnpj`] value type.
//!
//! A `Cnpj` can only be obtained through validation: the input is upper-cased,
//! classified as masked (`XX.XXX.XXX/XXXX-DD`) or unformatted (14 characters),
//! and its trailing check digits are recomputed from the root. Construction
//! either yields a fully populated value or a [`CnpjError`]. Both canonical
//! forms are stored, and nothing can mutate them afterwards.
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::check_digits::{self, BASE_LEN, CheckDigits, Mode};
use crate::error::CnpjError;

/// Length of the unformatted form.
pub const UNFORMATTED_LEN: usize = 14;

/// Length of the masked form.
pub const FORMATTED_LEN: usize = 18;

const HEAD_OFFICE_SUFFIX: &str = "0001";

const EXPECTED: &str = "14 characters ([0-9A-Z]{12} followed by 2 digits) \
                        or the mask XX.XXX.XXX/XXXX-DD";

// ---------------------------------------------------------------------------
// Regex statics
// ---------------------------------------------------------------------------

/// Unformatted: twelve root characters followed by two numeric check digits.
static UNFORMATTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Z]{12}[0-9]{2}$")
        .unwrap_or_else(|_| Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken")))
});

/// Masked: `XX.XXX.XXX/XXXX-DD`.
static FORMATTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Z]{2}\.[0-9A-Z]{3}\.[0-9A-Z]{3}/[0-9A-Z]{4}-[0-9]{2}$")
        .unwrap_or_else(|_| Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken")))
});

// ---------------------------------------------------------------------------
// Cnpj
// ---------------------------------------------------------------------------

/// A validated CNPJ, numeric or alphanumeric.
///
/// Holds the 14-character unformatted form and the 18-character masked form.
/// Dereferences to the unformatted form; [`fmt::Display`] renders the masked
/// one.
///
/// ```
/// use cnpj_core::Cnpj;
///
/// let cnpj = Cnpj::parse("sg.u1g.e72/0001-75").map_err(|e| e.to_string())?;
/// assert_eq!(cnpj.unformatted(), "SGU1GE72000175");
/// assert_eq!(cnpj.formatted(), "SG.U1G.E72/0001-75");
/// assert_eq!(cnpj.suffix(), Ok(1));
/// # Ok::<(), String>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cnpj {
    raw: String,
    formatted: String,
    mode: Mode,
    check_digits: CheckDigits,
}

impl Cnpj {
    /// Validates `text` and builds a `Cnpj` from it.
    ///
    /// Accepts the unformatted form (`11222333000181`, `SGU1GE72000175`) and
    /// the masked form (`11.222.333/0001-81`) in any letter case.
    ///
    /// # Errors
    ///
    /// - [`CnpjError::Structural`] when the input is blank or matches neither
    ///   form.
    /// - [`CnpjError::CheckDigitMismatch`] when the embedded check digits
    ///   differ from the computed ones.
    /// - [`CnpjError::InvalidAlphabet`] if the calculator meets a character it
    ///   cannot weight.
    pub fn parse(text: &str) -> Result<Self, CnpjError> {
        let result = Self::build(text);
        if let Err(err) = &result {
            tracing::debug!(kind = err.kind(), len = text.len(), "rejected CNPJ");
        }
        result
    }

    /// Builds a numeric `Cnpj` from its integer value.
    ///
    /// Leading zeros lost by the integer representation are restored, so
    /// `191` is read as `00000000000191`.
    ///
    /// # Errors
    ///
    /// Same as [`Cnpj::parse`]; numbers wider than 14 digits are
    /// [`CnpjError::Structural`].
    pub fn from_number(number: u64) -> Result<Self, CnpjError> {
        Self::parse(&format!("{number:014}"))
    }

    fn build(text: &str) -> Result<Self, CnpjError> {
        if text.trim().is_empty() {
            return Err(structural(text));
        }

        let upper = text.to_ascii_uppercase();
        let (raw, formatted) = if UNFORMATTED_RE.is_match(&upper) {
            let formatted = format_unformatted(&upper);
            (upper, formatted)
        } else if FORMATTED_RE.is_match(&upper) {
            (strip_mask(&upper), upper)
        } else {
            return Err(structural(text));
        };

        let (root, embedded) = raw.as_bytes().split_at(BASE_LEN);
        let mode = Mode::detect(&raw[..BASE_LEN]);
        let expected = check_digits::compute_normalized(root, mode, &raw)?;

        let found = CheckDigits::from_ascii([embedded[0], embedded[1]]);
        if found != Some(expected) {
            return Err(CnpjError::CheckDigitMismatch {
                found: raw[BASE_LEN..].to_owned(),
                input: raw,
                expected,
            });
        }

        Ok(Self {
            raw,
            formatted,
            mode,
            check_digits: expected,
        })
    }

    /// The 14-character unformatted form, upper-case.
    pub fn unformatted(&self) -> &str {
        &self.raw
    }

    /// Alias of [`Cnpj::unformatted`].
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The 18-character masked form `XX.XXX.XXX/XXXX-DD`.
    pub fn formatted(&self) -> &str {
        &self.formatted
    }

    /// The twelve-character root the check digits are computed from.
    pub fn root(&self) -> &str {
        &self.raw[..BASE_LEN]
    }

    /// The masked root, `XX.XXX.XXX/XXXX`.
    pub fn root_formatted(&self) -> &str {
        &self.formatted[..15]
    }

    /// The masked company part shared by all branches, `XX.XXX.XXX`.
    pub fn company_root_formatted(&self) -> &str {
        &self.formatted[..10]
    }

    /// The four-character branch segment between `/` and `-`.
    pub fn suffix_formatted(&self) -> &str {
        &self.formatted[11..15]
    }

    /// The branch segment read as an integer (`"0001"` gives `1`).
    ///
    /// # Errors
    ///
    /// [`CnpjError::NonNumericSuffix`] when the segment contains letters,
    /// which alphanumeric identifiers allow.
    pub fn suffix(&self) -> Result<u16, CnpjError> {
        let segment = self.suffix_formatted();
        if !segment.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CnpjError::NonNumericSuffix {
                suffix: segment.to_owned(),
            });
        }
        segment
            .parse::<u16>()
            .map_err(|_| CnpjError::NonNumericSuffix {
                suffix: segment.to_owned(),
            })
    }

    /// Returns whether the branch number equals `target`.
    ///
    /// # Errors
    ///
    /// - [`CnpjError::InvalidSuffixArgument`] when `target` is not positive.
    /// - [`CnpjError::NonNumericSuffix`] as for [`Cnpj::suffix`].
    pub fn suffix_equals(&self, target: i64) -> Result<bool, CnpjError> {
        if target <= 0 {
            return Err(CnpjError::InvalidSuffixArgument {
                got: target.to_string(),
            });
        }
        Ok(i64::from(self.suffix()?) == target)
    }

    /// Like [`Cnpj::suffix_equals`], with the target given as decimal text
    /// (`"1"` and `"0001"` are equivalent).
    ///
    /// # Errors
    ///
    /// [`CnpjError::InvalidSuffixArgument`] when `target` is empty, contains
    /// anything other than ASCII digits, or is zero.
    pub fn suffix_equals_str(&self, target: &str) -> Result<bool, CnpjError> {
        let invalid = || CnpjError::InvalidSuffixArgument {
            got: target.to_owned(),
        };
        if target.is_empty() || !target.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value = target.parse::<i64>().map_err(|_| invalid())?;
        if value == 0 {
            return Err(invalid());
        }
        self.suffix_equals(value)
    }

    /// Whether this is the head office (branch `0001`).
    #[deprecated(note = "use `suffix_equals(1)` instead")]
    pub fn is_head_office(&self) -> bool {
        self.suffix_formatted() == HEAD_OFFICE_SUFFIX
    }

    /// The embedded check digits.
    pub fn check_digits(&self) -> CheckDigits {
        self.check_digits
    }

    /// Character domain of the root, fixed at construction.
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

/// Returns `true` when `text` is a valid CNPJ in either form.
///
/// ```
/// assert!(cnpj_core::is_valid("11.222.333/0001-81"));
/// assert!(!cnpj_core::is_valid("11.222.333/0001-80"));
/// ```
pub fn is_valid(text: &str) -> bool {
    Cnpj::parse(text).is_ok()
}

fn structural(text: &str) -> CnpjError {
    CnpjError::Structural {
        expected: EXPECTED,
        got: text.to_owned(),
    }
}

/// Inserts the mask separators into a 14-character unformatted value.
///
/// Offsets apply to the growing string: `.` at 2, `.` at 6, `/` at 10 and `-`
/// at 15.
fn format_unformatted(raw: &str) -> String {
    let mut out = String::with_capacity(FORMATTED_LEN);
    out.push_str(raw);
    out.insert(2, '.');
    out.insert(6, '.');
    out.insert(10, '/');
    out.insert(15, '-');
    out
}

fn strip_mask(formatted: &str) -> String {
    formatted
        .chars()
        .filter(|c| !matches!(c, '.' | '/' | '-'))
        .collect()
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl TryFrom<&str> for Cnpj {
    type Error = CnpjError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl FromStr for Cnpj {
    type Err = CnpjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Deref for Cnpj {
    type Target = str;
    fn deref(&self) -> &str {
        &self.raw
    }
}

impl AsRef<str> for Cnpj {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

impl Serialize for Cnpj {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Cnpj {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

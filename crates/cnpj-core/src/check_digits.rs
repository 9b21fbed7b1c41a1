//! Modulo-11 check-digit computation for CNPJ identifiers.
//!
//! A CNPJ carries two trailing check digits computed from its twelve-character
//! root. The same weighted sum is applied twice: once over the root to obtain
//! the first digit, then over the root followed by that first digit to obtain
//! the second.
//!
//! Weights cycle through `2..=9` starting from the rightmost character. The
//! value contributed by each character depends on the [`Mode`] of the root:
//!
//! - [`Mode::Numeric`]: the decimal value of the digit.
//! - [`Mode::Alphanumeric`]: the ASCII code minus 48, for digits and letters
//!   alike. Digits keep their decimal value; `A` contributes 17 and `Z`
//!   contributes 42. This offset scheme is part of the published algorithm
//!   for alphanumeric roots and must not be replaced by `A = 10`.
//!
//! With `r = sum mod 11`, the digit is `0` when `r < 2`, else `11 - r`.

use std::fmt;

use crate::error::CnpjError;

/// Number of characters in a check-digit base (the CNPJ root).
pub const BASE_LEN: usize = 12;

const MODULUS: u8 = 11;
const MIN_WEIGHT: u32 = 2;
const MAX_WEIGHT: u32 = 9;

const BASE_EXPECTED: &str =
    "a 12-character root of [0-9A-Z], optionally masked as XX.XXX.XXX/XXXX";

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Character domain of a CNPJ root.
///
/// Selected once from the twelve root characters. The two modes share the
/// whole algorithm and differ only in how a character maps to its weighting
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    /// All twelve root characters are decimal digits.
    Numeric,
    /// At least one root character is a letter `A`-`Z`.
    Alphanumeric,
}

impl Mode {
    /// Classifies a normalized root.
    ///
    /// Returns [`Mode::Numeric`] only for exactly twelve ASCII digits; any
    /// other input is weighted as [`Mode::Alphanumeric`]. Whether the
    /// characters are actually legal is checked during the weighted sum.
    pub fn detect(base: &str) -> Self {
        if base.len() == BASE_LEN && base.bytes().all(|b| b.is_ascii_digit()) {
            Self::Numeric
        } else {
            Self::Alphanumeric
        }
    }

    /// Returns the weighting value of `byte`, or `None` when the byte is not
    /// part of this mode's alphabet.
    fn value_of(self, byte: u8) -> Option<u32> {
        match (self, byte) {
            (Self::Numeric, b'0'..=b'9') => Some(u32::from(byte - b'0')),
            (Self::Alphanumeric, b'0'..=b'9' | b'A'..=b'Z') => Some(u32::from(byte) - 48),
            (Self::Numeric | Self::Alphanumeric, _) => None,
        }
    }

    /// Lower-case name used in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Alphanumeric => "alphanumeric",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CheckDigits
// ---------------------------------------------------------------------------

/// The pair of verifier digits `(d1, d2)` of a CNPJ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CheckDigits {
    first: u8,
    second: u8,
}

impl CheckDigits {
    pub(crate) const fn new(first: u8, second: u8) -> Self {
        Self { first, second }
    }

    /// Reads a pair of ASCII digits, e.g. the last two bytes of a raw CNPJ.
    pub(crate) fn from_ascii(pair: [u8; 2]) -> Option<Self> {
        match pair {
            [a @ b'0'..=b'9', b @ b'0'..=b'9'] => Some(Self::new(a - b'0', b - b'0')),
            _ => None,
        }
    }

    /// First check digit, computed over the root.
    pub fn first(self) -> u8 {
        self.first
    }

    /// Second check digit, computed over the root followed by the first digit.
    pub fn second(self) -> u8 {
        self.second
    }

    /// Both digits read as one two-digit number (`"75"` gives `75`, `"05"`
    /// gives `5`).
    pub fn as_number(self) -> u8 {
        self.first * 10 + self.second
    }
}

impl fmt::Display for CheckDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Computes the two check digits of a CNPJ root.
///
/// `base` may be numeric or alphanumeric, in any case, with or without the
/// `XX.XXX.XXX/XXXX` mask. It is upper-cased and every character outside
/// `[0-9A-Z]` is dropped, so separators, spaces and stray punctuation are
/// ignored; what remains must be exactly twelve characters.
///
/// # Errors
///
/// [`CnpjError::Structural`] for blank input or when the remaining
/// characters do not number twelve.
///
/// # Examples
///
/// ```
/// use cnpj_core::check_digits::compute;
///
/// assert_eq!(compute("112223330001").map(|d| d.as_number()), Ok(81));
/// assert_eq!(compute("sg.u1g.e72/0001").map(|d| d.as_number()), Ok(75));
/// assert_eq!(compute("11 222 333 0001").map(|d| d.as_number()), Ok(81));
/// assert!(compute("1122233300").is_err());
/// ```
pub fn compute(base: &str) -> Result<CheckDigits, CnpjError> {
    if base.trim().is_empty() {
        return Err(CnpjError::Structural {
            expected: BASE_EXPECTED,
            got: base.to_owned(),
        });
    }

    let normalized = normalize_base(base);
    if normalized.len() != BASE_LEN {
        return Err(CnpjError::Structural {
            expected: BASE_EXPECTED,
            got: base.to_owned(),
        });
    }

    let mode = Mode::detect(&normalized);
    let digits = compute_normalized(normalized.as_bytes(), mode, base)?;
    tracing::trace!(%mode, %digits, "computed check digits");
    Ok(digits)
}

/// Computes the check digits of a numeric root given as an integer.
///
/// The number is left-padded with zeros to twelve digits, so `11222333`
/// is treated as the root `000011222333`.
///
/// # Errors
///
/// Returns [`CnpjError::Structural`] when `number` has more than twelve
/// digits.
///
/// # Examples
///
/// ```
/// use cnpj_core::check_digits::{compute, compute_number};
///
/// assert_eq!(compute_number(112_223_330_001), compute("112223330001"));
/// assert_eq!(compute_number(11_222_333), compute("000011222333"));
/// ```
pub fn compute_number(number: u64) -> Result<CheckDigits, CnpjError> {
    let base = format!("{number:012}");
    if base.len() != BASE_LEN {
        return Err(CnpjError::Structural {
            expected: "a number of at most 12 digits",
            got: base,
        });
    }
    compute(&base)
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Upper-cases `input` and keeps only `[0-9A-Z]`.
fn normalize_base(input: &str) -> String {
    input
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        .collect()
}

/// Runs both passes over an already normalized twelve-byte root.
///
/// `input` is only used to build error values.
pub(crate) fn compute_normalized(
    root: &[u8],
    mode: Mode,
    input: &str,
) -> Result<CheckDigits, CnpjError> {
    let first = weighted_digit(root, mode, input)?;

    let mut extended = Vec::with_capacity(root.len() + 1);
    extended.extend_from_slice(root);
    extended.push(b'0' + first);
    let second = weighted_digit(&extended, mode, input)?;

    Ok(CheckDigits::new(first, second))
}

/// One modulo-11 pass, weights `2..=9` cycling from the rightmost byte.
fn weighted_digit(chars: &[u8], mode: Mode, input: &str) -> Result<u8, CnpjError> {
    let mut sum: u32 = 0;
    let mut weight = MIN_WEIGHT;

    for (position, &byte) in chars.iter().enumerate().rev() {
        let value = mode
            .value_of(byte)
            .ok_or_else(|| CnpjError::InvalidAlphabet {
                input: input.to_owned(),
                character: char::from(byte),
                position,
            })?;
        sum += value * weight;
        weight += 1;
        if weight > MAX_WEIGHT {
            weight = MIN_WEIGHT;
        }
    }

    let remainder = u8::try_from(sum % u32::from(MODULUS)).unwrap_or(0);
    if remainder < 2 {
        Ok(0)
    } else {
        Ok(MODULUS - remainder)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn digits(base: &str) -> String {
        compute(base).expect("valid base").to_string()
    }

    // -- Numeric roots --------------------------------------------------------

    #[test]
    fn numeric_reference_root() {
        assert_eq!(digits("112223330001"), "81");
    }

    #[test]
    fn numeric_second_root() {
        assert_eq!(digits("072373730001"), "20");
    }

    #[test]
    fn numeric_all_zeros() {
        // Both sums are 0, remainder < 2 gives 0.
        assert_eq!(digits("000000000000"), "00");
    }

    #[test]
    fn numeric_branch_changes_digits() {
        assert_eq!(digits("112223330002"), "62");
        assert_eq!(digits("112223330000"), "09");
    }

    #[test]
    fn remainder_bounds() {
        // First pass remainder 10 gives 1, remainder 1 gives 0.
        assert_eq!(digits("000000000005"), "15");
        assert_eq!(digits("000000000006"), "04");
    }

    #[test]
    fn numeric_all_nines() {
        assert_eq!(digits("999999999999"), "62");
    }

    #[test]
    fn masked_numeric_root_is_accepted() {
        assert_eq!(digits("11.222.333/0001"), "81");
    }

    // -- Alphanumeric roots ---------------------------------------------------

    #[test]
    fn alphanumeric_reference_root() {
        assert_eq!(digits("SGU1GE720001"), "75");
    }

    #[test]
    fn alphanumeric_letters_in_branch() {
        // Published example root for the alphanumeric format.
        assert_eq!(digits("12ABC34501DE"), "35");
    }

    #[test]
    fn alphanumeric_all_letters() {
        assert_eq!(digits("AAAAAAAAAAAA"), "45");
        assert_eq!(digits("ZZZZZZZZZZZZ"), "62");
    }

    #[test]
    fn lower_case_is_upper_cased() {
        assert_eq!(digits("sgu1ge720001"), "75");
        assert_eq!(digits("sg.u1g.e72/0001"), "75");
    }

    #[test]
    fn letter_weight_uses_ascii_offset() {
        // 'A' must weigh 17, not 10.
        assert_eq!(Mode::Alphanumeric.value_of(b'A'), Some(17));
        assert_eq!(Mode::Alphanumeric.value_of(b'Z'), Some(42));
        assert_eq!(Mode::Alphanumeric.value_of(b'7'), Some(7));
    }

    // -- Mode -----------------------------------------------------------------

    #[test]
    fn mode_detection() {
        assert_eq!(Mode::detect("112223330001"), Mode::Numeric);
        assert_eq!(Mode::detect("SGU1GE720001"), Mode::Alphanumeric);
        assert_eq!(Mode::detect("11222333000"), Mode::Alphanumeric);
    }

    #[test]
    fn numeric_mode_rejects_letters() {
        assert_eq!(Mode::Numeric.value_of(b'A'), None);
        let err = compute_normalized(b"11222333000A", Mode::Numeric, "11222333000A")
            .expect_err("letter in numeric mode");
        assert_eq!(
            err,
            CnpjError::InvalidAlphabet {
                input: "11222333000A".to_owned(),
                character: 'A',
                position: 11,
            }
        );
    }

    #[test]
    fn alphanumeric_mode_rejects_lower_case_bytes() {
        let err = compute_normalized(b"sgu1ge720001", Mode::Alphanumeric, "sgu1ge720001")
            .expect_err("lower case leaked past normalization");
        assert_eq!(err.kind(), "invalid-alphabet");
    }

    // -- Failures -------------------------------------------------------------

    #[test]
    fn blank_is_structural() {
        for input in ["", "   "] {
            let err = compute(input).expect_err("blank");
            assert_eq!(err.kind(), "structural", "input {input:?}");
        }
    }

    #[test]
    fn wrong_length_is_structural() {
        for input in ["11222333000", "1122233300012", "11.222.333/00011"] {
            let err = compute(input).expect_err("wrong length");
            assert_eq!(err.kind(), "structural", "input {input:?}");
        }
    }

    #[test]
    fn characters_outside_alphabet_are_dropped() {
        for input in [
            "11 222 333 0001",
            " 112223330001 ",
            "11*222*333/0001",
            "11.222.333/0001\n",
            "11222333#0001",
            "É112223330001",
        ] {
            assert_eq!(
                compute(input).expect("dropped characters leave a valid root").as_number(),
                81,
                "input {input:?}"
            );
        }
    }

    #[test]
    fn only_punctuation_is_structural() {
        let err = compute("../--/ *").expect_err("nothing left");
        assert_eq!(err.kind(), "structural");
    }

    #[test]
    fn dropping_characters_still_checks_length() {
        let err = compute("11 222 333 000").expect_err("eleven characters left");
        assert_eq!(err.kind(), "structural");
    }

    // -- compute_number -------------------------------------------------------

    #[test]
    fn number_is_zero_padded() {
        assert_eq!(
            compute_number(11_222_333).expect("valid"),
            compute("000011222333").expect("valid")
        );
        assert_eq!(compute_number(0).expect("valid").to_string(), "00");
    }

    #[test]
    fn number_too_wide_is_structural() {
        let err = compute_number(1_000_000_000_000).expect_err("13 digits");
        assert_eq!(err.kind(), "structural");
    }

    // -- CheckDigits ----------------------------------------------------------

    #[test]
    fn check_digits_accessors() {
        let d = compute("SGU1GE720001").expect("valid");
        assert_eq!(d.first(), 7);
        assert_eq!(d.second(), 5);
        assert_eq!(d.as_number(), 75);
    }

    #[test]
    fn check_digits_display_keeps_leading_zero() {
        let d = compute("112223330000").expect("valid");
        assert_eq!(d.to_string(), "09");
        assert_eq!(d.as_number(), 9);
    }

    #[test]
    fn check_digits_from_ascii() {
        assert_eq!(CheckDigits::from_ascii(*b"81"), Some(CheckDigits::new(8, 1)));
        assert_eq!(CheckDigits::from_ascii(*b"8A"), None);
    }
}

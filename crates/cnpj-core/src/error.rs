/// Error type shared by the check-digit calculator and the [`crate::Cnpj`]
/// value type.
///
/// Every failure is reported synchronously by the operation that detected it.
/// None of them are transient: the computation is pure, so retrying the same
/// input always yields the same error.
use std::fmt;

use crate::check_digits::CheckDigits;

// ---------------------------------------------------------------------------
// CnpjError
// ---------------------------------------------------------------------------

/// All error conditions produced by `cnpj-core`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CnpjError {
    /// The input does not have the shape of a CNPJ (or of a check-digit base):
    /// blank, wrong length, or malformed separators.
    Structural {
        /// A human-readable description of the accepted shapes.
        expected: &'static str,
        /// The input that was rejected.
        got: String,
    },

    /// The input is well formed but its trailing check digits do not match
    /// the ones computed from its root.
    CheckDigitMismatch {
        /// The normalized input (upper-cased).
        input: String,
        /// The check digits computed from the root.
        expected: CheckDigits,
        /// The two trailing characters actually present in the input.
        found: String,
    },

    /// A character outside the alphabet of the active mode was found while
    /// computing check digits.
    InvalidAlphabet {
        /// The input handed to the calculator.
        input: String,
        /// The offending character.
        character: char,
        /// Zero-based character position within the normalized base.
        position: usize,
    },

    /// A suffix comparison was requested against a target that is not a
    /// natural number greater than zero.
    InvalidSuffixArgument {
        /// The rejected comparison target, as text.
        got: String,
    },

    /// The branch segment of the identifier contains letters and cannot be
    /// read as an integer.
    NonNumericSuffix {
        /// The four-character branch segment.
        suffix: String,
    },
}

impl CnpjError {
    /// Returns a stable kebab-case tag naming the error category.
    ///
    /// The tag is part of the CLI's JSON output and does not change between
    /// releases.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Structural { .. } => "structural",
            Self::CheckDigitMismatch { .. } => "check-digit-mismatch",
            Self::InvalidAlphabet { .. } => "invalid-alphabet",
            Self::InvalidSuffixArgument { .. } => "invalid-suffix-argument",
            Self::NonNumericSuffix { .. } => "non-numeric-suffix",
        }
    }
}

impl fmt::Display for CnpjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural { expected, got } => {
                write!(f, "invalid CNPJ: expected {expected}, got {got:?}")
            }
            Self::CheckDigitMismatch {
                input,
                expected,
                found,
            } => write!(
                f,
                "invalid CNPJ {input:?}: check digits {found:?} do not match computed {expected}"
            ),
            Self::InvalidAlphabet {
                input,
                character,
                position,
            } => write!(
                f,
                "invalid CNPJ {input:?}: character {character:?} at position {position} is not allowed"
            ),
            Self::InvalidSuffixArgument { got } => write!(
                f,
                "suffix {got:?} must be a natural number greater than zero"
            ),
            Self::NonNumericSuffix { suffix } => {
                write!(f, "branch suffix {suffix:?} is not numeric")
            }
        }
    }
}

impl std::error::Error for CnpjError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

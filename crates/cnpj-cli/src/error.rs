/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `cnpj` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure. The tool could not read the values to
///   check at all.
/// - Exit code **1**: logical failure. The values were read but at least one
///   of them is not a valid CNPJ.
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `cnpj` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// An input file could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read an input file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-input-size` limit.
    InputTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes, when known (disk files only).
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// Any other I/O error, including failures to write output.
    IoError {
        /// The file or stream involved.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// One or more values passed to `validate` are invalid.
    ///
    /// The per-value results have already been printed.
    InvalidIdentifiers {
        /// Number of rejected values.
        count: usize,
    },

    /// The single value passed to `format` or `inspect` is invalid.
    InvalidIdentifier {
        /// The rejected input.
        input: String,
        /// The validation error message.
        detail: String,
    },

    /// The base passed to `check-digits` is not a valid twelve-character root.
    InvalidBase {
        /// The rejected input.
        input: String,
        /// The validation error message.
        detail: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    ///
    /// - `2`: input failure (file not found, unreadable stdin, etc.).
    /// - `1`: logical failure (an invalid identifier or base).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::InputTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. } => 2,

            Self::InvalidIdentifiers { .. }
            | Self::InvalidIdentifier { .. }
            | Self::InvalidBase { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::InputTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: input too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::InputTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: input too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::InvalidIdentifiers { count: 1 } => "error: 1 value is not a valid CNPJ".to_owned(),
            Self::InvalidIdentifiers { count } => {
                format!("error: {count} values are not valid CNPJs")
            }
            Self::InvalidIdentifier { input, detail } => {
                format!("error: {input:?} is not a valid CNPJ: {detail}")
            }
            Self::InvalidBase { input, detail } => {
                format!("error: {input:?} is not a valid CNPJ root: {detail}")
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

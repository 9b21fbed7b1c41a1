/// File and stdin reading with size enforcement and UTF-8 validation.
///
/// `cnpj-core` never performs I/O; all reading happens here.
///
/// - Disk files: size checked via `std::fs::metadata` before any read.
/// - Stdin: buffered with a `Read::take` cap so allocation is bounded.
/// - UTF-8 validation reports the byte offset of the first bad sequence.
/// - All I/O errors are converted to [`CliError`] variants with exit code 2.
use std::io::Read as _;
use std::path::Path;

use crate::cli::PathOrStdin;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads `source` and splits it into one candidate value per line.
///
/// Surrounding whitespace (including `\r`) is trimmed and blank lines are
/// skipped.
///
/// # Errors
///
/// See [`read_input`].
pub fn read_values(source: &PathOrStdin, max_size: u64) -> Result<Vec<String>, CliError> {
    let content = read_input(source, max_size)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect())
}

/// Reads the entire contents of `source` into a `String`.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) for a missing or unreadable file, input
/// larger than `max_size`, a stdin read failure, or invalid UTF-8.
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<String, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

// ---------------------------------------------------------------------------
// Disk file reading
// ---------------------------------------------------------------------------

fn read_file(path: &Path, max_size: u64) -> Result<String, CliError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error_to_cli(&e, path))?
        .len();

    if file_size > max_size {
        return Err(CliError::InputTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))?;
    bytes_to_string(bytes, &path.display().to_string())
}

/// Maps a `std::io::Error` from a disk-file operation to a [`CliError`].
#[allow(clippy::wildcard_enum_match_arm)]
fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    match e.kind() {
        std::io::ErrorKind::NotFound => CliError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => CliError::PermissionDenied {
            path: path.to_path_buf(),
        },
        // ErrorKind is non-exhaustive.
        _ => CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Stdin reading
// ---------------------------------------------------------------------------

/// Reads the entire stdin stream, capped at `max_size` bytes.
///
/// When exactly `max_size` bytes arrive, one more byte is probed to tell
/// "at the limit" from "over the limit".
fn read_stdin(max_size: u64) -> Result<String, CliError> {
    let stdin = std::io::stdin();
    let mut handle = stdin.lock();

    let mut buf: Vec<u8> = Vec::new();
    (&mut handle)
        .take(max_size)
        .read_to_end(&mut buf)
        .map_err(|e| CliError::StdinReadError {
            detail: e.to_string(),
        })?;

    if buf.len() as u64 == max_size {
        let mut probe = [0u8; 1];
        let extra = handle
            .read(&mut probe)
            .map_err(|e| CliError::StdinReadError {
                detail: e.to_string(),
            })?;
        if extra > 0 {
            return Err(CliError::InputTooLarge {
                source: "-".to_owned(),
                limit: max_size,
                actual: None,
            });
        }
    }

    bytes_to_string(buf, "-")
}

// ---------------------------------------------------------------------------
// UTF-8 conversion
// ---------------------------------------------------------------------------

fn bytes_to_string(bytes: Vec<u8>, source_label: &str) -> Result<String, CliError> {
    String::from_utf8(bytes).map_err(|e| CliError::InvalidUtf8 {
        source: source_label.to_owned(),
        byte_offset: e.utf8_error().valid_up_to(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::wildcard_enum_match_arm)]

    use std::io::Write as _;
    use std::path::PathBuf;

    use super::*;

    fn temp_file_with(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("create temp file");
        f.write_all(contents).expect("write temp file");
        f
    }

    #[test]
    fn read_values_splits_and_trims_lines() {
        let f = temp_file_with(b"11222333000181\r\n\n  SG.U1G.E72/0001-75  \n\n");
        let source = PathOrStdin::Path(f.path().to_path_buf());
        let values = read_values(&source, 1024).expect("read values");
        assert_eq!(values, vec!["11222333000181", "SG.U1G.E72/0001-75"]);
    }

    #[test]
    fn read_values_of_empty_file_is_empty() {
        let f = temp_file_with(b"");
        let source = PathOrStdin::Path(f.path().to_path_buf());
        assert!(read_values(&source, 1024).expect("read").is_empty());
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let source = PathOrStdin::Path(PathBuf::from("/nonexistent/cnpjs.txt"));
        match read_input(&source, 1024) {
            Err(CliError::FileNotFound { path }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/cnpjs.txt"));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn oversized_file_is_rejected_before_reading() {
        let f = temp_file_with(&[b'1'; 64]);
        let source = PathOrStdin::Path(f.path().to_path_buf());
        match read_input(&source, 10) {
            Err(CliError::InputTooLarge { limit, actual, .. }) => {
                assert_eq!(limit, 10);
                assert_eq!(actual, Some(64));
            }
            other => panic!("expected InputTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn file_at_exact_limit_is_accepted() {
        let f = temp_file_with(b"11222333000181");
        let source = PathOrStdin::Path(f.path().to_path_buf());
        assert_eq!(
            read_input(&source, 14).expect("exact limit"),
            "11222333000181"
        );
    }

    #[test]
    fn invalid_utf8_reports_offset() {
        let f = temp_file_with(b"1122\xff");
        let source = PathOrStdin::Path(f.path().to_path_buf());
        match read_input(&source, 1024) {
            Err(CliError::InvalidUtf8 { byte_offset, .. }) => assert_eq!(byte_offset, 4),
            other => panic!("expected InvalidUtf8, got {other:?}"),
        }
    }
}

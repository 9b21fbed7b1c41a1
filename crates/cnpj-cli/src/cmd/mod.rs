/// Command modules for the `cnpj` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or a
/// [`crate::error::CliError`] on failure.
pub mod check_digits;
pub mod format;
pub mod inspect;
pub mod validate;

use crate::error::CliError;

/// Converts a failed write to `stream` into [`CliError::IoError`].
pub(crate) fn write_failed(stream: &'static str) -> impl Fn(std::io::Error) -> CliError {
    move |e| CliError::IoError {
        source: stream.to_owned(),
        detail: e.to_string(),
    }
}

//! Implementation of `cnpj format <VALUE> [--unformatted]`.
//!
//! Prints the canonical masked form (or, with `--unformatted`, the
//! 14-character form) of a valid CNPJ.
//!
//! Exit codes: 0 = success, 1 = invalid value.
use std::io::Write as _;

use cnpj_core::Cnpj;

use crate::cli::OutputFormat;
use crate::cmd::write_failed;
use crate::error::CliError;
use crate::format::result_json;

/// Parses `value`, mapping rejection to [`CliError::InvalidIdentifier`].
///
/// # Errors
///
/// [`CliError::InvalidIdentifier`] when `value` is not a valid CNPJ.
pub fn parse_value(value: &str) -> Result<Cnpj, CliError> {
    Cnpj::parse(value).map_err(|e| CliError::InvalidIdentifier {
        input: value.to_owned(),
        detail: e.to_string(),
    })
}

/// Picks the canonical form to print.
pub fn canonical(cnpj: &Cnpj, unformatted: bool) -> &str {
    if unformatted {
        cnpj.unformatted()
    } else {
        cnpj.formatted()
    }
}

/// Runs the `format` command.
///
/// # Errors
///
/// [`CliError::InvalidIdentifier`] (exit 1) for an invalid value.
pub fn run(value: &str, unformatted: bool, format: OutputFormat) -> Result<(), CliError> {
    let cnpj = parse_value(value)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => writeln!(out, "{}", canonical(&cnpj, unformatted)),
        OutputFormat::Json => writeln!(out, "{}", result_json(value, &Ok(cnpj))),
    }
    .map_err(write_failed("stdout"))
}

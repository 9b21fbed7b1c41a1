//! Implementation of `cnpj check-digits <BASE>`.
//!
//! Exit codes: 0 = success, 1 = invalid base.
use std::io::Write as _;

use cnpj_core::{CheckDigits, compute};

use crate::cli::OutputFormat;
use crate::cmd::write_failed;
use crate::error::CliError;

/// Runs the `check-digits` command.
///
/// # Errors
///
/// [`CliError::InvalidBase`] (exit 1) when `base` is not a valid root.
pub fn run(base: &str, format: OutputFormat) -> Result<(), CliError> {
    let digits = compute(base).map_err(|e| CliError::InvalidBase {
        input: base.to_owned(),
        detail: e.to_string(),
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => writeln!(out, "{digits}"),
        OutputFormat::Json => writeln!(out, "{}", digits_json(base, digits)),
    }
    .map_err(write_failed("stdout"))
}

fn digits_json(base: &str, digits: CheckDigits) -> serde_json::Value {
    serde_json::json!({
        "base": base,
        "check_digits": digits.to_string(),
        "first": digits.first(),
        "second": digits.second(),
    })
}

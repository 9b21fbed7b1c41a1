//! Implementation of `cnpj validate <VALUE>... [--input FILE]`.
//!
//! Every value is validated independently; one result line per value goes to
//! stdout. In human mode a `N valid, M invalid` summary follows on stderr.
//!
//! Exit codes: 0 = all valid, 1 = at least one invalid, 2 = input failure.
use std::time::Instant;

use cnpj_core::Cnpj;

use crate::cli::{OutputFormat, PathOrStdin};
use crate::cmd::write_failed;
use crate::error::CliError;
use crate::format::{FormatterConfig, write_result, write_summary_human, write_timing_human};
use crate::io;

/// Tally of a validation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    /// Number of accepted values.
    pub valid: usize,
    /// Number of rejected values.
    pub invalid: usize,
}

/// Validates `candidates`, writing one result per value to `out`.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn validate_all<W: std::io::Write>(
    out: &mut W,
    candidates: &[String],
    format: OutputFormat,
    config: &FormatterConfig,
) -> std::io::Result<Tally> {
    let mut tally = Tally::default();
    for candidate in candidates {
        let result = Cnpj::parse(candidate);
        if result.is_ok() {
            tally.valid += 1;
        } else {
            tally.invalid += 1;
        }
        write_result(out, candidate, &result, format, config)?;
    }
    Ok(tally)
}

/// Runs the `validate` command.
///
/// # Errors
///
/// - [`CliError::InvalidIdentifiers`] (exit 1) when any value is rejected.
/// - Exit-2 variants when `--input` cannot be read.
pub fn run(
    values: &[String],
    input: Option<&PathOrStdin>,
    max_input_size: u64,
    format: OutputFormat,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let start = Instant::now();

    let mut candidates = values.to_vec();
    if let Some(source) = input {
        candidates.extend(io::read_values(source, max_input_size)?);
    }
    tracing::debug!(count = candidates.len(), "validating values");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let tally = validate_all(&mut out, &candidates, format, config).map_err(write_failed("stdout"))?;

    let stderr = std::io::stderr();
    let mut err_out = stderr.lock();
    if format == OutputFormat::Human {
        write_summary_human(&mut err_out, tally.valid, tally.invalid, config)
            .map_err(write_failed("stderr"))?;
    }
    write_timing_human(&mut err_out, "validated", start.elapsed(), config)
        .map_err(write_failed("stderr"))?;

    if tally.invalid > 0 {
        Err(CliError::InvalidIdentifiers {
            count: tally.invalid,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn config() -> FormatterConfig {
        FormatterConfig {
            colors: false,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn tallies_valid_and_invalid() {
        let candidates = vec![
            "11222333000181".to_owned(),
            "SG.U1G.E72/0001-75".to_owned(),
            "SGU1GE72000100".to_owned(),
        ];
        let mut buf = Vec::new();
        let tally = validate_all(&mut buf, &candidates, OutputFormat::Human, &config())
            .expect("write");
        assert_eq!(tally, Tally { valid: 2, invalid: 1 });

        let out = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "[OK] 11.222.333/0001-81");
        assert_eq!(lines[1], "[OK] SG.U1G.E72/0001-75");
        assert!(lines[2].starts_with("[ERR] SGU1GE72000100"));
    }

    #[test]
    fn json_emits_one_line_per_value() {
        let candidates = vec!["11222333000181".to_owned(), String::new()];
        let mut buf = Vec::new();
        validate_all(&mut buf, &candidates, OutputFormat::Json, &config()).expect("write");
        let out = String::from_utf8(buf).expect("utf8");
        assert_eq!(out.lines().count(), 2);
        for line in out.lines() {
            serde_json::from_str::<serde_json::Value>(line).expect("each line is JSON");
        }
    }

    #[test]
    fn empty_input_is_all_valid() {
        let mut buf = Vec::new();
        let tally = validate_all(&mut buf, &[], OutputFormat::Human, &config()).expect("write");
        assert_eq!(tally, Tally::default());
        assert!(buf.is_empty());
    }
}

/// Result formatting: human-readable and JSON (NDJSON) modes.
///
/// - **Human mode** (default): one tagged line per value, `[OK]` in green and
///   `[ERR]` in red. Colors are disabled when `--no-color` is set, the
///   `NO_COLOR` environment variable is present, or stdout is not a TTY.
/// - **JSON mode**: each result is one single-line JSON object (NDJSON).
///
/// Quiet mode drops valid results and the summary; only rejected values are
/// printed.
use std::io::{IsTerminal as _, Write};
use std::time::Duration;

use cnpj_core::{Cnpj, CnpjError};

use crate::cli::OutputFormat;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stdout.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

const ANSI_RED: &str = "\x1b[31m";
const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Configuration for the result formatter, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Print only rejected values.
    pub quiet: bool,
    /// Emit timing information to stderr.
    pub verbose: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }
}

// ---------------------------------------------------------------------------
// Human mode
// ---------------------------------------------------------------------------

/// Writes one validation result in human-readable form.
///
/// Format: `[OK] 11.222.333/0001-81` or `[ERR] 11222333000180: <message>`.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_result_human<W: Write>(
    writer: &mut W,
    input: &str,
    result: &Result<Cnpj, CnpjError>,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    let (tag, color, text) = match result {
        Ok(_) if config.quiet => return Ok(()),
        Ok(cnpj) => ("[OK]", ANSI_GREEN, cnpj.formatted().to_owned()),
        Err(err) => ("[ERR]", ANSI_RED, format!("{input}: {err}")),
    };
    if config.colors {
        writeln!(writer, "{color}{tag}{ANSI_RESET} {text}")
    } else {
        writeln!(writer, "{tag} {text}")
    }
}

/// Writes the `N valid, M invalid` summary line. Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary_human<W: Write>(
    writer: &mut W,
    valid: usize,
    invalid: usize,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    writeln!(writer, "{valid} valid, {invalid} invalid")
}

/// Writes timing information in verbose mode; a no-op otherwise.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_timing_human<W: Write>(
    writer: &mut W,
    label: &str,
    duration: Duration,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    writeln!(writer, "{label} in {}ms", duration.as_millis())
}

// ---------------------------------------------------------------------------
// JSON mode
// ---------------------------------------------------------------------------

/// Builds the JSON object describing one validation result.
pub fn result_json(input: &str, result: &Result<Cnpj, CnpjError>) -> serde_json::Value {
    match result {
        Ok(cnpj) => serde_json::json!({
            "input": input,
            "valid": true,
            "unformatted": cnpj.unformatted(),
            "formatted": cnpj.formatted(),
        }),
        Err(err) => serde_json::json!({
            "input": input,
            "valid": false,
            "error": {
                "kind": err.kind(),
                "message": err.to_string(),
            },
        }),
    }
}

/// Writes one validation result as an NDJSON line.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_result_json<W: Write>(
    writer: &mut W,
    input: &str,
    result: &Result<Cnpj, CnpjError>,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet && result.is_ok() {
        return Ok(());
    }
    writeln!(writer, "{}", result_json(input, result))
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Writes one validation result in the selected output format.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_result<W: Write>(
    writer: &mut W,
    input: &str,
    result: &Result<Cnpj, CnpjError>,
    format: OutputFormat,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Human => write_result_human(writer, input, result, config),
        OutputFormat::Json => write_result_json(writer, input, result, config),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn plain() -> FormatterConfig {
        FormatterConfig {
            colors: false,
            quiet: false,
            verbose: false,
        }
    }

    fn capture(input: &str, format: OutputFormat, config: &FormatterConfig) -> String {
        let result = Cnpj::parse(input);
        let mut buf = Vec::new();
        write_result(&mut buf, input, &result, format, config).expect("write");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn human_valid_prints_masked_form() {
        assert_eq!(
            capture("11222333000181", OutputFormat::Human, &plain()),
            "[OK] 11.222.333/0001-81\n"
        );
    }

    #[test]
    fn human_invalid_prints_input_and_reason() {
        let out = capture("SGU1GE72000100", OutputFormat::Human, &plain());
        assert!(out.starts_with("[ERR] SGU1GE72000100: "), "output: {out}");
        assert!(out.contains("75"), "output: {out}");
    }

    #[test]
    fn human_color_wraps_tag() {
        let config = FormatterConfig {
            colors: true,
            ..plain()
        };
        let ok = capture("11222333000181", OutputFormat::Human, &config);
        assert!(ok.starts_with(ANSI_GREEN), "output: {ok:?}");
        let err = capture("11222333000180", OutputFormat::Human, &config);
        assert!(err.starts_with(ANSI_RED), "output: {err:?}");
    }

    #[test]
    fn quiet_drops_valid_results_only() {
        let config = FormatterConfig {
            quiet: true,
            ..plain()
        };
        assert!(capture("11222333000181", OutputFormat::Human, &config).is_empty());
        assert!(capture("11222333000181", OutputFormat::Json, &config).is_empty());
        assert!(!capture("11222333000180", OutputFormat::Human, &config).is_empty());
        assert!(!capture("11222333000180", OutputFormat::Json, &config).is_empty());
    }

    #[test]
    fn json_valid_object() {
        let out = capture("sg.u1g.e72/0001-75", OutputFormat::Json, &plain());
        let value: serde_json::Value = serde_json::from_str(out.trim()).expect("json");
        assert_eq!(value["valid"], true);
        assert_eq!(value["input"], "sg.u1g.e72/0001-75");
        assert_eq!(value["unformatted"], "SGU1GE72000175");
        assert_eq!(value["formatted"], "SG.U1G.E72/0001-75");
    }

    #[test]
    fn json_invalid_object_carries_kind() {
        let out = capture("", OutputFormat::Json, &plain());
        let value: serde_json::Value = serde_json::from_str(out.trim()).expect("json");
        assert_eq!(value["valid"], false);
        assert_eq!(value["error"]["kind"], "structural");
    }

    #[test]
    fn json_is_single_line() {
        let out = capture("11222333000181", OutputFormat::Json, &plain());
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn summary_and_timing() {
        let mut buf = Vec::new();
        write_summary_human(&mut buf, 2, 1, &plain()).expect("write");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "2 valid, 1 invalid\n");

        let mut buf = Vec::new();
        write_timing_human(&mut buf, "validated", Duration::from_millis(3), &plain())
            .expect("write");
        assert!(buf.is_empty(), "timing needs --verbose");

        let verbose = FormatterConfig {
            verbose: true,
            ..plain()
        };
        let mut buf = Vec::new();
        write_timing_human(&mut buf, "validated", Duration::from_millis(3), &verbose)
            .expect("write");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "validated in 3ms\n");
    }

    #[test]
    fn colors_disabled_by_flag() {
        assert!(!colors_enabled(true));
    }
}

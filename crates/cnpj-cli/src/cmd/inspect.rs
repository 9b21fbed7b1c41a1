//! Implementation of `cnpj inspect <VALUE>`.
//!
//! Prints every field derived from a valid CNPJ: both canonical forms, the
//! root and its masked variants, the branch segment, the check digits, the
//! character mode and whether the branch is the head office.
//!
//! In `--format json` mode a single JSON object is emitted to stdout.
//! In human mode, aligned key/value lines are printed.
//!
//! Exit codes: 0 = success, 1 = invalid value.
use cnpj_core::Cnpj;

use crate::cli::OutputFormat;
use crate::cmd::format::parse_value;
use crate::cmd::write_failed;
use crate::error::CliError;

/// Fields derived from a parsed [`Cnpj`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    /// 14-character form.
    pub unformatted: String,
    /// 18-character masked form.
    pub formatted: String,
    /// Twelve-character check-digit base.
    pub root: String,
    /// Masked root, `XX.XXX.XXX/XXXX`.
    pub root_formatted: String,
    /// Masked company part, `XX.XXX.XXX`.
    pub company_root: String,
    /// Four-character branch segment.
    pub suffix: String,
    /// Branch number, or `None` when the branch segment contains letters.
    pub branch_number: Option<u16>,
    /// The two check digits as text.
    pub check_digits: String,
    /// `numeric` or `alphanumeric`.
    pub mode: &'static str,
    /// Whether the branch is `0001`.
    pub head_office: bool,
}

impl InspectReport {
    /// Collects the report fields from `cnpj`.
    pub fn from_cnpj(cnpj: &Cnpj) -> Self {
        Self {
            unformatted: cnpj.unformatted().to_owned(),
            formatted: cnpj.formatted().to_owned(),
            root: cnpj.root().to_owned(),
            root_formatted: cnpj.root_formatted().to_owned(),
            company_root: cnpj.company_root_formatted().to_owned(),
            suffix: cnpj.suffix_formatted().to_owned(),
            branch_number: cnpj.suffix().ok(),
            check_digits: cnpj.check_digits().to_string(),
            mode: cnpj.mode().as_str(),
            head_office: cnpj.suffix_equals(1).unwrap_or(false),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "unformatted": self.unformatted,
            "formatted": self.formatted,
            "root": self.root,
            "root_formatted": self.root_formatted,
            "company_root": self.company_root,
            "suffix": self.suffix,
            "branch_number": self.branch_number,
            "check_digits": self.check_digits,
            "mode": self.mode,
            "head_office": self.head_office,
        })
    }
}

/// Runs the `inspect` command.
///
/// # Errors
///
/// [`CliError::InvalidIdentifier`] (exit 1) for an invalid value.
pub fn run(value: &str, format: OutputFormat) -> Result<(), CliError> {
    let cnpj = parse_value(value)?;
    let report = InspectReport::from_cnpj(&cnpj);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => print_human(&mut out, &report),
        OutputFormat::Json => print_json(&mut out, &report),
    }
    .map_err(write_failed("stdout"))
}

/// Writes the report as aligned key/value lines.
fn print_human<W: std::io::Write>(w: &mut W, report: &InspectReport) -> std::io::Result<()> {
    writeln!(w, "unformatted:     {}", report.unformatted)?;
    writeln!(w, "formatted:       {}", report.formatted)?;
    writeln!(w, "root:            {}", report.root)?;
    writeln!(w, "root_formatted:  {}", report.root_formatted)?;
    writeln!(w, "company_root:    {}", report.company_root)?;
    writeln!(w, "suffix:          {}", report.suffix)?;
    match report.branch_number {
        Some(n) => writeln!(w, "branch_number:   {n}")?,
        None => writeln!(w, "branch_number:   -")?,
    }
    writeln!(w, "check_digits:    {}", report.check_digits)?;
    writeln!(w, "mode:            {}", report.mode)?;
    writeln!(w, "head_office:     {}", report.head_office)?;
    Ok(())
}

/// Writes the report as a single JSON object.
fn print_json<W: std::io::Write>(w: &mut W, report: &InspectReport) -> std::io::Result<()> {
    writeln!(w, "{}", report.to_json())
}

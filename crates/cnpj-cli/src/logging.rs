//! Stderr diagnostics via `tracing-subscriber`.
//!
//! The filter comes from `--log-level` (or `CNPJ_LOG`). Without one, only
//! warnings are shown, or debug events with `--verbose`.
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Builds the filter for `directive`, falling back to the default level when
/// the directive is absent or malformed. A malformed directive is returned
/// alongside so it can be reported once logging is up.
pub fn build_filter(directive: Option<&str>, verbose: bool) -> (EnvFilter, Option<ParseError>) {
    let default = if verbose { "debug" } else { "warn" };
    match directive.map(EnvFilter::try_new) {
        Some(Ok(filter)) => (filter, None),
        Some(Err(e)) => (EnvFilter::new(default), Some(e)),
        None => (EnvFilter::new(default), None),
    }
}

/// Installs the global subscriber. Call once, from `main`.
pub fn init(directive: Option<&str>, verbose: bool) {
    let (filter, rejected) = build_filter(directive, verbose);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    if let Some(e) = rejected {
        tracing::warn!(error = %e, "ignoring invalid log filter");
    }
}

//! Entry point for the `cnpj` binary.
use clap::Parser;

mod cli;
mod cmd;
mod error;
mod format;
mod io;
mod logging;

use cli::{Cli, Command};
use error::CliError;
use format::FormatterConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref(), cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

/// Dispatches the parsed command line to its subcommand.
fn run(cli: &Cli) -> Result<(), CliError> {
    let config = FormatterConfig::from_flags(cli.no_color, cli.quiet, cli.verbose);
    tracing::debug!(version = cnpj_core::version(), "starting");

    match &cli.command {
        Command::Validate { values, input } => cmd::validate::run(
            values,
            input.as_ref(),
            cli.max_input_size,
            cli.format,
            &config,
        ),
        Command::Format { value, unformatted } => cmd::format::run(value, *unformatted, cli.format),
        Command::CheckDigits { base } => cmd::check_digits::run(base, cli.format),
        Command::Inspect { value } => cmd::inspect::run(value, cli.format),
    }
}

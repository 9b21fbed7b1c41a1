//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Default cap on `--input` size: 16 MiB, roughly a million identifiers.
pub const DEFAULT_MAX_INPUT_SIZE: u64 = 16 * 1024 * 1024;

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` emits aligned or tagged text. `Json` emits one JSON object per
/// result (NDJSON for `validate`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// Structured JSON / NDJSON output.
    Json,
}

/// All top-level subcommands exposed by the `cnpj` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Validate one or more CNPJs, masked or unformatted.
    Validate {
        /// Values to validate.
        #[arg(value_name = "VALUE", required_unless_present = "input")]
        values: Vec<String>,
        /// Read newline-separated values from a file, or `-` for stdin.
        #[arg(long, short = 'i', value_name = "FILE")]
        input: Option<PathOrStdin>,
    },

    /// Print the canonical form of a CNPJ.
    Format {
        /// The CNPJ to normalize.
        #[arg(value_name = "VALUE")]
        value: String,
        /// Print the 14-character unformatted form instead of the mask.
        #[arg(long)]
        unformatted: bool,
    },

    /// Compute the two check digits of a twelve-character root.
    #[command(name = "check-digits")]
    CheckDigits {
        /// The root, optionally masked as XX.XXX.XXX/XXXX.
        #[arg(value_name = "BASE")]
        base: String,
    },

    /// Print every field derived from a CNPJ.
    Inspect {
        /// The CNPJ to inspect.
        #[arg(value_name = "VALUE")]
        value: String,
    },
}

/// Root CLI struct for the `cnpj` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "cnpj",
    version,
    about = "CNPJ validation and formatting",
    long_about = "Validates, normalizes and formats Brazilian CNPJ identifiers,\n\
                  numeric or alphanumeric, and computes their check digits."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(
        long,
        short = 'f',
        default_value = "human",
        global = true,
        env = "CNPJ_FORMAT"
    )]
    pub format: OutputFormat,

    /// Suppress everything except invalid results and errors (incompatible
    /// with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print timing and debug logs to stderr (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum size in bytes of the `--input` file or stream.
    #[arg(
        long,
        global = true,
        env = "CNPJ_MAX_INPUT_SIZE",
        default_value_t = DEFAULT_MAX_INPUT_SIZE
    )]
    pub max_input_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log filter directive for stderr diagnostics (e.g. `debug`,
    /// `cnpj_core=trace`). Defaults to `warn`, or `debug` with `--verbose`.
    #[arg(long, global = true, env = "CNPJ_LOG", value_name = "FILTER")]
    pub log_level: Option<String>,
}

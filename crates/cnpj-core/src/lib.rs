#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod check_digits;
pub mod cnpj;
pub mod error;

pub use check_digits::{CheckDigits, Mode, compute, compute_number};
pub use cnpj::{Cnpj, FORMATTED_LEN, UNFORMATTED_LEN, is_valid};
pub use error::CnpjError;

/// Returns the current version of the cnpj-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Command-line interface.

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{run, serve};
pub use errors::{CliError, CliResult};

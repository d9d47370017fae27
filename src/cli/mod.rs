pub mod commands;
pub mod context;
pub mod error;
mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod table;

pub use context::{CliMode, ShellContext};
pub use error::{CliError, CommandError};
pub use shell::run_cli;

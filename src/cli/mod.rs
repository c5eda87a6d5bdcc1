mod commands;

pub use commands::{Cli, Command, ConfigAction, OutputFormat};

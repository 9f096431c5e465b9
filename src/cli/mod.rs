mod commands;
pub mod handlers;

pub use commands::{Cli, ColorArg, Commands, ConfigAction};

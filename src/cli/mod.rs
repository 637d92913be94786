//! CLI layer for study-chat.
//!
//! Provides the command-line interface using clap, with commands for
//! creating the users file, browsing the directory and running chat
//! sessions.

pub mod commands;
pub mod output;
pub mod parser;
pub mod session;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands, SessionCommand};
pub use session::Session;

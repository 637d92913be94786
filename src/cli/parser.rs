//! Command-line argument parsing.
//!
//! Defines the binary's CLI and the grammar of session lines, both using
//! clap derive macros.

use crate::core::DEFAULT_CAPACITY;
use crate::directory::DEFAULT_USERS_PATH;
use crate::error::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// study-chat: study groups with a terminal chat.
///
/// Manages study groups, their members and message history over a CSV
/// directory of users.
#[derive(Parser, Debug)]
#[command(name = "study-chat")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the users CSV file.
    ///
    /// Defaults to `users.csv` in the current directory.
    #[arg(short, long, env = "STUDY_CHAT_USERS")]
    pub users: Option<PathBuf>,

    /// Capacity of groups created without an explicit one.
    #[arg(short, long, env = "STUDY_CHAT_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Enable verbose (debug) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a sample users file.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },

    /// List or search the user directory.
    Users {
        /// Show only users with this name (case-insensitive).
        #[arg(short, long, conflicts_with = "email")]
        name: Option<String>,

        /// Show only the user with this email (case-insensitive).
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Run a chat session.
    ///
    /// Reads one command per line from the script file, or from stdin.
    Run {
        /// Read commands from this file instead of stdin.
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
}

impl Cli {
    /// Returns the users file path, using the default if not specified.
    #[must_use]
    pub fn get_users_path(&self) -> PathBuf {
        self.users
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_PATH))
    }

    /// Returns the validated default group capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the capacity is zero.
    pub fn default_capacity(&self) -> Result<usize> {
        if self.capacity == 0 {
            return Err(Error::Config {
                message: "default capacity must be greater than zero".to_string(),
            });
        }
        Ok(self.capacity)
    }
}

/// One line of session input.
#[derive(Parser, Debug)]
#[command(name = "study-chat", no_binary_name = true, disable_version_flag = true)]
pub struct SessionLine {
    /// The session command.
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Commands accepted inside a session.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    /// Create a new group.
    Create {
        /// Group name.
        name: String,

        /// Maximum number of members.
        #[arg(short, long)]
        capacity: Option<usize>,
    },

    /// Delete a group.
    #[command(alias = "rm")]
    Delete {
        /// Group name.
        name: String,
    },

    /// List all groups.
    #[command(alias = "ls")]
    Groups,

    /// Select the group messages are sent to.
    Select {
        /// Group name.
        name: String,
    },

    /// Show the selected group.
    Current,

    /// Add a user to a group.
    Add {
        /// Group name.
        group: String,

        /// User ID.
        user_id: String,
    },

    /// Remove a user from a group.
    Remove {
        /// Group name.
        group: String,

        /// User ID.
        user_id: String,
    },

    /// List the members of a group (default: selected group).
    Members {
        /// Group name.
        group: Option<String>,
    },

    /// Show the message history of a group (default: selected group).
    Messages {
        /// Group name.
        group: Option<String>,
    },

    /// Send a message to the selected group.
    Send {
        /// Sender user ID.
        user_id: String,

        /// Message text.
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Check whether a user is a member of a group (default: selected group).
    Member {
        /// User ID.
        user_id: String,

        /// Group name.
        group: Option<String>,
    },

    /// Enter chat mode in the selected group.
    Chat {
        /// User ID to chat as.
        user_id: String,
    },

    /// List the user directory.
    Users,

    /// End the session.
    #[command(alias = "exit")]
    Quit,
}

/// Splits a session line into words.
///
/// Words are separated by whitespace. A single or double quote at the
/// start of a word groups everything up to the matching quote, spaces
/// included; quotes inside a word are kept as written. An unterminated
/// quote runs to the end of the line.
#[must_use]
pub fn split_line(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if !in_word && (c == '"' || c == '\'') => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_word {
        words.push(current);
    }
    words
}

/// Returns what follows the first `skip` whitespace-separated words of
/// `line`, exactly as written apart from the leading whitespace.
#[must_use]
pub fn rest_of_line(line: &str, skip: usize) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..skip {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
        SessionLine::command().debug_assert();
    }

    #[test]
    fn test_default_users_path() {
        let cli = Cli {
            users: None,
            capacity: DEFAULT_CAPACITY,
            verbose: false,
            format: "text".to_string(),
            command: Commands::Users {
                name: None,
                email: None,
            },
        };
        assert_eq!(cli.get_users_path(), PathBuf::from(DEFAULT_USERS_PATH));
        assert_eq!(cli.default_capacity().unwrap(), 10);
    }

    #[test]
    fn test_zero_capacity_is_config_error() {
        let cli = Cli::try_parse_from(["study-chat", "--capacity", "0", "run"]).unwrap();
        assert!(matches!(cli.default_capacity(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_session_create() {
        let line = SessionLine::try_parse_from(["create", "Calc1", "-c", "2"]).unwrap();
        assert_eq!(
            line.command,
            SessionCommand::Create {
                name: "Calc1".to_string(),
                capacity: Some(2),
            }
        );
    }

    #[test]
    fn test_session_send_collects_text() {
        let line = SessionLine::try_parse_from(split_line("send 1 hello -there world")).unwrap();
        assert_eq!(
            line.command,
            SessionCommand::Send {
                user_id: "1".to_string(),
                text: vec![
                    "hello".to_string(),
                    "-there".to_string(),
                    "world".to_string()
                ],
            }
        );
    }

    #[test]
    fn test_session_aliases() {
        let line = SessionLine::try_parse_from(["ls"]).unwrap();
        assert_eq!(line.command, SessionCommand::Groups);
        let line = SessionLine::try_parse_from(["exit"]).unwrap();
        assert_eq!(line.command, SessionCommand::Quit);
    }

    #[test]
    fn test_session_unknown_command() {
        assert!(SessionLine::try_parse_from(["frobnicate"]).is_err());
    }

    #[test]
    fn test_split_line() {
        assert_eq!(split_line("  add   Calc1 2 "), ["add", "Calc1", "2"]);
        assert_eq!(
            split_line("create \"Linear Algebra\" -c 3"),
            ["create", "Linear Algebra", "-c", "3"]
        );
        assert_eq!(split_line("send 1 'it is'"), ["send", "1", "it is"]);
        assert_eq!(
            split_line("send 1 it's a \"test\""),
            ["send", "1", "it's", "a", "\"test\""]
        );
        assert_eq!(split_line("select \"\""), ["select", ""]);
        assert!(split_line("   ").is_empty());
    }

    #[test]
    fn test_rest_of_line() {
        assert_eq!(rest_of_line("send 1 it's  a test", 2), "it's  a test");
        assert_eq!(rest_of_line("  send\t1   hi ", 2), "hi ");
        assert_eq!(rest_of_line("send 1", 2), "");
        assert_eq!(rest_of_line("send", 3), "");
    }
}

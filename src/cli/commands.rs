//! CLI command implementations.
//!
//! Contains the logic behind each top-level command. Output is written to
//! the supplied writer; the binary passes stdout.

use crate::cli::output::{OutputFormat, format_users};
use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::controller::GroupController;
use crate::directory::{MemoryDirectory, UserDirectory, write_sample_csv};
use crate::error::{CommandError, DirectoryError, Result};
use crate::registry::Registry;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::info;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
/// * `input` - Session input used by `run` when no script is given.
/// * `output` - Destination for command output.
/// * `prompt` - Whether `run` should write prompts (interactive stdin).
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute<R: BufRead, W: Write>(
    cli: &Cli,
    input: R,
    output: &mut W,
    prompt: bool,
) -> Result<()> {
    let format = OutputFormat::parse(&cli.format);
    let users_path = cli.get_users_path();

    let text = match &cli.command {
        Commands::Init { force } => cmd_init(&users_path, *force, format)?,
        Commands::Users { name, email } => {
            cmd_users(&users_path, name.as_deref(), email.as_deref(), format)?
        }
        Commands::Run { script } => {
            let capacity = cli.default_capacity()?;
            return match script {
                Some(path) => {
                    let file = File::open(path).map_err(|e| {
                        CommandError::ExecutionFailed(format!(
                            "cannot open script {}: {e}",
                            path.display()
                        ))
                    })?;
                    cmd_run(&users_path, capacity, BufReader::new(file), output, format, false)
                }
                None => cmd_run(&users_path, capacity, input, output, format, prompt),
            };
        }
    };

    output.write_all(text.as_bytes())?;
    output.flush()?;
    Ok(())
}

/// Loads the users file, pointing at `init` when it is missing.
fn open_directory(users_path: &Path) -> Result<MemoryDirectory> {
    if !users_path.exists() {
        return Err(DirectoryError::NotInitialized {
            path: users_path.to_string_lossy().to_string(),
        }
        .into());
    }

    MemoryDirectory::load_csv(users_path)
}

// ==================== Command Implementations ====================

fn cmd_init(users_path: &Path, force: bool, format: OutputFormat) -> Result<String> {
    if users_path.exists() && !force {
        return Err(CommandError::ExecutionFailed(
            "Users file already exists. Use --force to overwrite.".to_string(),
        )
        .into());
    }

    let count = write_sample_csv(users_path)?;

    match format {
        OutputFormat::Text => Ok(format!(
            "Created users file at: {} ({count} users)\n",
            users_path.display()
        )),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "path": users_path.to_string_lossy(),
                "user_count": count,
            });
            Ok(serde_json::to_string_pretty(&result).unwrap_or_default())
        }
    }
}

fn cmd_users(
    users_path: &Path,
    name: Option<&str>,
    email: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let directory = open_directory(users_path)?;

    let users = match (name, email) {
        (Some(name), _) => directory.get_users_by_name(name),
        (None, Some(email)) => directory.get_user_by_email(email).into_iter().collect(),
        (None, None) => directory.users().iter().collect(),
    };

    Ok(format_users(&users, format))
}

fn cmd_run<R: BufRead, W: Write>(
    users_path: &Path,
    capacity: usize,
    input: R,
    output: &mut W,
    format: OutputFormat,
    prompt: bool,
) -> Result<()> {
    let directory = open_directory(users_path)?;
    let mut controller =
        GroupController::new(directory, Registry::new()).with_default_capacity(capacity);

    let processed = Session::new(&mut controller, output, format, prompt).run(input)?;

    info!(
        lines = processed,
        groups = controller.groups().len(),
        "session finished"
    );
    Ok(())
}

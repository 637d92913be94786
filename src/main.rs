//! Binary entry point for study-chat.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::Parser;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use study_chat::cli::output::{OutputFormat, format_error};
use study_chat::cli::{Cli, execute};
use study_chat::logging::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = OutputFormat::parse(&cli.format);

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout().lock();

    match execute(&cli, stdin.lock(), &mut stdout, interactive) {
        Ok(()) => ExitCode::SUCCESS,
        // Handle broken pipe gracefully (e.g., when piped to `head` or `jq`)
        Err(e) if e.is_broken_pipe() => ExitCode::SUCCESS,
        Err(e) => {
            let error_output = format_error(&e, format);
            match format {
                OutputFormat::Json => {
                    // JSON errors go to stdout for programmatic parsing
                    println!("{error_output}");
                }
                OutputFormat::Text => {
                    eprintln!("Error: {error_output}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

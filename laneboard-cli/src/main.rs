//! Laneboard CLI - a single kanban board in the terminal
//!
//! Exit codes:
//! - 0: Success, including commands whose card or column no longer exists
//! - 1: Error

mod activity;
mod cli;
mod commands;
mod render;

use clap::Parser;
use cli::Cli;
use laneboard::BoardError;

fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.quiet);

    let code = match commands::run(&cli) {
        Ok(()) => 0,
        Err(error) => match error.downcast_ref::<BoardError>() {
            Some(board_error) if board_error.is_benign() => {
                eprintln!("nothing to do: {board_error}");
                0
            }
            _ => {
                eprintln!("Error: {error:#}");
                1
            }
        },
    };
    std::process::exit(code);
}

fn configure_logging(verbose: bool, quiet: bool) {
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

    let log_level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("laneboard={log_level},{log_level}")));

    registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

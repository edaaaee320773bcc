//! Command-line definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Laneboard - a single kanban board in your terminal.
///
/// Column and card arguments accept an id or an exact title (case-insensitive).
/// Positions are zero-based and clamped to the available range.
#[derive(Parser, Debug)]
#[command(name = "laneboard")]
#[command(version)]
#[command(about = "A single kanban board of ordered columns and cards")]
pub struct Cli {
    /// Directory holding the stored board (overrides configuration)
    #[arg(long, global = true, value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Configuration file to use instead of ./laneboard.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Name recorded on activity entries
    #[arg(long, global = true)]
    pub actor: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Show the board
    Show,

    /// Append a column to the board
    AddColumn {
        /// Column title
        title: String,
    },

    /// Rename a column
    RenameColumn {
        /// Column id or title
        column: String,
        /// New title
        title: String,
    },

    /// Delete a column together with its cards
    DeleteColumn {
        /// Column id or title
        column: String,
    },

    /// Move a column to a new position
    MoveColumn {
        /// Column id or title
        column: String,
        /// Zero-based target position
        position: usize,
    },

    /// Add a card to the end of a column
    AddCard {
        /// Column id or title
        column: String,
        /// Card title
        title: String,
        /// Card description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Edit a card's title or description
    EditCard {
        /// Card id or title
        card: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New description; an empty string clears it
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a card
    DeleteCard {
        /// Card id or title
        card: String,
    },

    /// Move a card to a column; to the end unless a position is given
    MoveCard {
        /// Card id or title
        card: String,
        /// Destination column id or title
        column: String,
        /// Zero-based destination position
        #[arg(short, long)]
        position: Option<usize>,
    },

    /// Show recent activity, newest first
    Activity {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },

    /// Validate the stored board without repairing it
    Check,

    /// List the board operations and their parameters
    Ops,
}

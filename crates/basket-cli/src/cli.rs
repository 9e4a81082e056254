use basket_domain::ListId;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "basket")]
#[command(about = "Shopping lists in your terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the SQLite database (or set BASKET_DB env var)
    #[arg(long, value_name = "PATH", env = "BASKET_DB", global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List operations
    List(ListCommand),
    /// Shopping session operations
    Shop(ShopCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// List commands
#[derive(Args)]
pub struct ListCommand {
    #[command(subcommand)]
    pub action: ListAction,
}

#[derive(Subcommand)]
pub enum ListAction {
    /// Create a new list
    Create {
        #[arg(long)]
        name: String,
        /// Comma-separated items, e.g. "Pain, Lait, Œufs"
        #[arg(long)]
        items: Option<String>,
        /// Every item must be checked before a session can be saved
        #[arg(long)]
        temporary: bool,
    },
    /// Show all lists
    All,
    /// Show the most recently performed lists
    Recent {
        #[arg(long, default_value_t = 2)]
        limit: usize,
    },
    /// Get a specific list
    Get {
        #[arg(long)]
        id: ListId,
    },
    /// Rename a list
    Rename {
        #[arg(long)]
        id: ListId,
        #[arg(long)]
        name: String,
    },
    /// Replace the items of a list
    SetItems {
        #[arg(long)]
        id: ListId,
        #[arg(long)]
        items: String,
    },
    /// Mark a list as performed now
    Perform {
        #[arg(long)]
        id: ListId,
    },
    /// Delete a list
    Delete {
        #[arg(long)]
        id: ListId,
    },
}

// Shop commands
#[derive(Args)]
pub struct ShopCommand {
    #[command(subcommand)]
    pub action: ShopAction,
}

#[derive(Subcommand)]
pub enum ShopAction {
    /// Show the checkable items of a list
    Show {
        #[arg(long)]
        id: ListId,
    },
    /// Check items off and save; checked items are removed from the list
    Save(ShopSaveArgs),
}

#[derive(Args)]
pub struct ShopSaveArgs {
    #[arg(long)]
    pub id: ListId,
    /// Item name to check (case-insensitive, repeatable)
    #[arg(long = "check", value_name = "NAME")]
    pub check: Vec<String>,
    /// Item position to check, as shown by `shop show` (repeatable)
    #[arg(long = "check-index", value_name = "INDEX")]
    pub check_index: Vec<usize>,
    /// Check every item
    #[arg(long)]
    pub all: bool,
    /// Print the result without saving
    #[arg(long)]
    pub dry_run: bool,
}

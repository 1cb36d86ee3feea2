use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gtdo", about = concat!("gtdo v", env!("CARGO_PKG_VERSION"), " - rank, lay out and tree your tasks"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a gtdo.toml config file
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the dependency tree
    Tree(TreeArgs),
    /// Show rank and position of each active task
    Layout(LayoutArgs),
    /// Move a task to a new rank
    Mv(MvArgs),
    /// Find tasks whose title matches every query term
    Search(SearchArgs),
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// JSON file with task records
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// JSON file with task records
    pub file: PathBuf,
    /// Include done tasks
    #[arg(long)]
    pub show_done: bool,
}

#[derive(Args, Debug)]
pub struct MvArgs {
    /// JSON file with task records
    pub file: PathBuf,
    /// Key of the task to move
    pub key: String,
    /// Target rank (0 = top)
    pub ord: usize,
    /// Include done tasks
    #[arg(long)]
    pub show_done: bool,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// JSON file with task records
    pub file: PathBuf,
    /// Query terms
    #[arg(required = true)]
    pub query: Vec<String>,
    /// Include done tasks
    #[arg(long)]
    pub show_done: bool,
}

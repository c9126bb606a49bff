use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "panel",
    version,
    about = "Table search filter and mission counters for the attendance dashboard"
)]
pub struct Cli {
    /// Directory holding persisted counters
    #[arg(long, env = "PANEL_STORE", global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the rows whose search column contains TERM (case-insensitive)
    Filter(FilterArgs),
    /// Record one action and show the mission panel
    Record(RecordArgs),
    /// Record a page load
    Load(ShowArgs),
    /// Show the mission panel without recording anything
    Missions(MissionsArgs),
}

#[derive(Parser)]
pub struct FilterArgs {
    /// Search term; empty matches every row
    pub term: String,

    /// Column to search (default 4, or [filter].column from config)
    #[arg(long)]
    pub column: Option<usize>,

    /// Cell separator, a single character (default tab)
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Read rows from this file instead of stdin
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RecordArgs {
    /// Action name, e.g. saveJustification or exportReport
    pub action: String,

    #[command(flatten)]
    pub show: ShowArgs,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Emit the HTML fragments the dashboard injects
    #[arg(long)]
    pub html: bool,
}

#[derive(Parser)]
pub struct MissionsArgs {
    /// Emit the HTML fragment the dashboard injects
    #[arg(long, conflicts_with = "json")]
    pub html: bool,

    /// Dump every counter as JSON
    #[arg(long)]
    pub json: bool,
}

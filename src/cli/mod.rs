use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::Category;

#[derive(Parser, Debug)]
#[command(
    name = "report-review",
    about = "Review dashboard for document analysis findings"
)]
pub struct Cli {
    /// Document to "analyze" (.pdf, .docx, .doc or .tex, max 50MB).
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Skip the analysis animation and open the dashboard directly.
    #[arg(long)]
    pub skip_intake: bool,

    /// Event poll interval for the TUI, in milliseconds.
    #[arg(long, default_value = "100")]
    pub tick_ms: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print summary statistics and the open-issue breakdown.
    Status(StatusArgs),
    /// List findings in one category in display order.
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Toggle these finding ids before printing (repeatable).
    #[arg(short, long = "resolve", value_name = "ID")]
    pub resolve: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Category to list (Format, Language, Citation, Image or Logic).
    pub category: Category,

    /// Toggle these finding ids before listing (repeatable).
    #[arg(short, long = "resolve", value_name = "ID")]
    pub resolve: Vec<String>,
}

/// Parse CLI arguments.
pub fn parse_args() -> Cli {
    Cli::parse()
}

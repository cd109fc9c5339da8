//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "pollcalc")]
#[command(about = "A terminal page with a poll form and a safe arithmetic calculator")]
pub struct Cli {
    /// Write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Open this page snapshot on start-up
    #[arg(long)]
    pub load: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Evaluate an arithmetic expression and print the result
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Submit both forms on a fresh page and print it as HTML
    Render {
        #[arg(long, allow_hyphen_values = true)]
        response: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        expression: Option<String>,
    },
}

impl Cli {
    /// `true` when the terminal UI will run and owns the screen.
    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }
}

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "scredits",
    version,
    about = "Retrieve and display Slurm SU usage per account and user"
)]
pub struct Cli {
    /// Print debug messages (including the sshare command line)
    #[arg(short, long)]
    pub verbose: bool,

    /// Show detailed account and user association
    #[arg(short, long, conflicts_with = "json")]
    pub detailed: bool,

    /// Export per-user account balances as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Only report this account
    #[arg(short, long, value_name = "NAME")]
    pub account: Option<String>,

    /// Parse a saved `sshare -P` dump instead of running sshare ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Table,
    Detailed,
    Json,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.detailed {
            Mode::Detailed
        } else if self.json {
            Mode::Json
        } else {
            Mode::Table
        }
    }
}

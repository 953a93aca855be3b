use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "directory")]
#[command(about = "Headless client for the directory service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory service origin, without the `/api` suffix
    #[arg(long, global = true, env = "DIRECTORY_API_URL")]
    pub api_url: Option<String>,

    /// Session file (defaults to the platform config directory)
    #[arg(long, global = true, env = "DIRECTORY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        #[arg(long, short = 'u')]
        user: String,

        /// Prompted for when omitted
        #[arg(long, short = 'p')]
        password: Option<String>,
    },
    /// Forget the session
    Logout,
    /// Print the directory, optionally filtered
    List {
        /// Case-insensitive substring filter, as COLUMN=TEXT
        #[arg(long = "filter", short = 'f', value_parser = parse_assignment)]
        filters: Vec<(String, String)>,

        /// Exact-match filter, as COLUMN=VALUE
        #[arg(long = "select", short = 's', value_parser = parse_assignment)]
        selects: Vec<(String, String)>,
    },
    /// Download the spreadsheet export as DIRECTORIO.xlsx
    Export {
        /// Target directory (defaults to the download directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Upload a photo for a row
    UploadPhoto {
        /// Zero-based row index
        #[arg(long, short = 'r')]
        row: usize,

        file: PathBuf,

        /// Also save the table once the photo is stored
        #[arg(long)]
        save: bool,
    },
}

/// Parses `COLUMN=VALUE`. The value may be empty; the column may not.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let Some((column, value)) = raw.split_once('=') else {
        bail!("expected COLUMN=VALUE, got '{raw}'");
    };
    if column.trim().is_empty() {
        bail!("column name is empty in '{raw}'");
    }
    Ok((column.trim().to_owned(), value.to_owned()))
}

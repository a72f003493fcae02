//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::storage::default_storage_path;

pub const DEFAULT_BASE_URL: &str = "http://localhost/";

/// Mortgage cost calculator.
///
/// Shows down payment, closing cost and agent commissions for a range of
/// mortgage amounts around the one you enter. Inputs are remembered between
/// runs and can be shared as a link.
#[derive(Debug, Parser)]
#[command(name = "mortgage-calculator", version)]
pub struct Cli {
    /// Shared calculator link to open, e.g. `http://localhost/?mortgageAmount=250000`.
    pub link: Option<String>,

    /// Address used when no link is given.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Settings file. Defaults to the user config directory.
    #[arg(long)]
    pub storage: Option<PathBuf>,

    /// Write logs to this file. Without it the interactive UI logs nowhere.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the results table and share link, then exit.
    #[arg(long)]
    pub print: bool,

    /// Write the results as CSV to this path, then exit.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

impl Cli {
    pub fn start_url(&self) -> &str {
        self.link.as_deref().unwrap_or(&self.base_url)
    }

    pub fn storage_path(&self) -> PathBuf {
        self.storage.clone().unwrap_or_else(default_storage_path)
    }

    /// True when no terminal UI will run.
    pub fn is_batch(&self) -> bool {
        self.print || self.csv.is_some()
    }
}

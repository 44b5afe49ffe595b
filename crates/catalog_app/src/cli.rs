use std::path::PathBuf;

use clap::Parser;

/// Browse the creature catalog from the terminal.
#[derive(Debug, Parser)]
#[command(name = "catalog", version, about)]
pub struct Cli {
    /// URL-style query, e.g. "q=saur&sort=weight&order=desc".
    #[arg(default_value = "")]
    pub query: String,

    /// Load this many additional pages after the first.
    #[arg(long, default_value_t = 0)]
    pub more: u32,

    /// Print the category vocabulary and exit.
    #[arg(long)]
    pub categories: bool,

    /// Toggle an identifier in the favorites before listing.
    #[arg(long, value_name = "ID")]
    pub toggle_favorite: Option<u64>,

    /// Upstream API base URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory holding the favorites file.
    #[arg(long)]
    pub favorites_dir: Option<PathBuf>,

    /// RON configuration file (defaults to ./catalog.ron when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log destination.
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_and_flags() {
        let cli = Cli::parse_from(["catalog", "q=saur&sort=id", "--more", "2", "--verbose"]);
        assert_eq!(cli.query, "q=saur&sort=id");
        assert_eq!(cli.more, 2);
        assert!(cli.verbose);
        assert_eq!(cli.log, LogTarget::Terminal);
    }

    #[test]
    fn query_defaults_to_empty() {
        let cli = Cli::parse_from(["catalog", "--toggle-favorite", "25", "--log", "both"]);
        assert_eq!(cli.query, "");
        assert_eq!(cli.toggle_favorite, Some(25));
        assert_eq!(cli.log, LogTarget::Both);
    }
}

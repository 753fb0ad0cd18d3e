//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the artwork catalog.
///
/// Global options apply to every subcommand; each of them can also come
/// from the environment (or a `.env` file in the working directory).
#[derive(Parser)]
#[command(name = "artcat")]
#[command(about = "Catalog artworks, their images and printable one-pagers")]
#[command(version)]
pub struct Cli {
    /// Directory holding the catalog database and media tree
    #[arg(long = "data-dir", env = "ARTCAT_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Artist attributed to every artwork in this catalog
    #[arg(long, env = "ARTCAT_ARTIST", global = true)]
    pub artist: Option<String>,

    /// Key required in X-API-Key on the JSON API
    #[arg(long = "api-key", env = "ARTCAT_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Longest edge of generated thumbnails, in pixels
    #[arg(long = "thumbnail-edge", env = "ARTCAT_THUMBNAIL_EDGE", global = true)]
    pub thumbnail_edge: Option<u32>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "artcat",
            "--verbose",
            "--data-dir",
            "/tmp/catalog",
            "paths",
            "--artist",
            "Ada Lovelace",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/catalog")));
        assert_eq!(cli.artist.as_deref(), Some("Ada Lovelace"));
        assert!(matches!(cli.command, Some(Commands::Paths)));
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["artcat"]);
        assert!(cli.command.is_none());
    }
}

//! Subcommand definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use artcat_core::{ArtworkFilter, ArtworkQuery, ArtworkSort, Pagination};

use crate::error::CliError;

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTML catalog and the JSON API
    Web {
        /// Port to listen on
        #[arg(short, long, env = "ARTCAT_PORT", default_value_t = artcat_core::settings::DEFAULT_PORT)]
        port: u16,
        /// Skip the media reconciliation pass at startup
        #[arg(long)]
        no_reconcile: bool,
        /// Restrict CORS on /api to these origins (repeatable)
        #[arg(long = "allow-origin")]
        allow_origins: Vec<String>,
    },
    /// List artworks, optionally filtered
    List(ListArgs),
    /// Show one artwork with its images
    Show {
        /// Artwork id, e.g. A0001
        id: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write the printable one-pager PDF of an artwork
    Export {
        /// Artwork id, e.g. A0001
        id: String,
        /// Output file (defaults to <id>_onepager.pdf)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Remove orphaned media files and report records whose files are gone
    Reconcile,
    /// Show the resolved data, database and media locations
    Paths,
}

/// Search options of `artcat list`.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Free text matched against title, description and keywords
    #[arg(short, long)]
    pub query: Option<String>,
    /// Artist name substring
    #[arg(long)]
    pub by: Option<String>,
    /// Medium substring
    #[arg(long, alias = "style")]
    pub medium: Option<String>,
    #[arg(long)]
    pub year_min: Option<i32>,
    #[arg(long)]
    pub year_max: Option<i32>,
    #[arg(long)]
    pub width_min: Option<f64>,
    #[arg(long)]
    pub width_max: Option<f64>,
    /// One of id, -id, year, -year, title
    #[arg(long, default_value = "id")]
    pub sort: String,
    #[arg(long, default_value_t = 0)]
    pub offset: u32,
    #[arg(long)]
    pub limit: Option<u32>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn to_query(&self) -> Result<ArtworkQuery, CliError> {
        let sort: ArtworkSort = self
            .sort
            .parse()
            .map_err(|e: artcat_core::ValidationError| CliError::Arguments(e.to_string()))?;

        Ok(ArtworkQuery {
            filter: ArtworkFilter {
                query: self.query.clone(),
                artist: self.by.clone(),
                medium: self.medium.clone(),
                year_min: self.year_min,
                year_max: self.year_max,
                width_min: self.width_min,
                width_max: self.width_max,
            },
            sort,
            page: Pagination::new(self.offset, self.limit),
        })
    }
}

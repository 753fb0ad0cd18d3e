//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Database pool and repositories (via artcat-db)
//! - Media storage and thumbnails (via artcat-media)
//! - One-pager rendering (via artcat-export)
//!
//! Command handlers receive the fully-composed AppCore and delegate work to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use artcat_core::paths::ResolvedPaths;
use artcat_core::services::AppCore;
use artcat_core::{CatalogSettings, Media, validate_settings};
use artcat_db::{CoreFactory, setup_database};
use artcat_export::OnePagerRenderer;
use artcat_media::{FsMediaStorage, ThumbnailProcessor};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Data directory override; `None` resolves from the environment.
    pub data_dir: Option<PathBuf>,
    /// Catalog settings handed to the services.
    pub settings: CatalogSettings,
}

impl CliConfig {
    /// Create config with default settings.
    pub fn with_defaults() -> Self {
        Self {
            data_dir: None,
            settings: CatalogSettings::with_defaults(),
        }
    }

    /// Layer the global command-line options over the defaults.
    pub fn from_cli(cli: &Cli) -> Self {
        let defaults = CatalogSettings::with_defaults();
        Self {
            data_dir: cli.data_dir.clone(),
            settings: CatalogSettings {
                artist_name: cli.artist.clone().or(defaults.artist_name),
                api_key: cli.api_key.clone(),
                thumbnail_edge: cli.thumbnail_edge.or(defaults.thumbnail_edge),
                ..defaults
            },
        }
    }

    /// Resolve the catalog locations without touching the filesystem.
    pub fn resolve_paths(&self) -> Result<ResolvedPaths> {
        Ok(match &self.data_dir {
            Some(dir) => ResolvedPaths::under(dir),
            None => ResolvedPaths::resolve(None)?,
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The core application facade.
    pub app: AppCore,
    /// Where the database and media tree live.
    pub paths: ResolvedPaths,
}

impl CliContext {
    /// Access the AppCore.
    pub const fn app(&self) -> &AppCore {
        &self.app
    }

    pub const fn paths(&self) -> &ResolvedPaths {
        &self.paths
    }
}

/// Bootstrap the CLI application.
///
/// Unlike the web server, no reconciliation runs here; `artcat reconcile`
/// does that on demand.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    validate_settings(&config.settings).map_err(|e| CliError::Config(e.to_string()))?;

    let paths = config.resolve_paths()?;
    paths
        .ensure()
        .map_err(|e| CliError::Io(e.to_string()))?;

    tracing::debug!(
        target: "artcat.paths",
        data_root = %paths.data_root.display(),
        database_path = %paths.database_path.display(),
        media_root = %paths.media_root.display(),
        "CLI bootstrap resolved paths"
    );

    // 1. Create database pool with full schema setup
    let pool = setup_database(&paths.database_path)
        .await
        .map_err(|e| CliError::Database(e.to_string()))
        .with_context(|| format!("opening {}", paths.database_path.display()))?;

    // 2. Media adapters
    let media = Media::new(
        Arc::new(FsMediaStorage::new(&paths.media_root)),
        Arc::new(ThumbnailProcessor::new(
            config.settings.effective_thumbnail_edge(),
        )),
        Arc::new(OnePagerRenderer),
    );

    // 3. Assemble AppCore
    let app = CoreFactory::build_app_core(pool, media, config.settings);

    Ok(CliContext { app, paths })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli_layers_over_defaults() {
        let cli = Cli::parse_from(["artcat", "--artist", "Hilma af Klint", "paths"]);
        let config = CliConfig::from_cli(&cli);
        assert_eq!(config.settings.effective_artist_name(), "Hilma af Klint");
        assert_eq!(
            config.settings.thumbnail_edge,
            CatalogSettings::with_defaults().thumbnail_edge
        );
    }

    #[tokio::test]
    async fn test_bootstrap_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig {
            data_dir: Some(dir.path().join("catalog")),
            ..CliConfig::with_defaults()
        };

        let ctx = bootstrap(config).await.unwrap();
        assert!(ctx.paths().database_path.exists());
        assert!(ctx.paths().media_root.is_dir());
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_bad_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..CliConfig::with_defaults()
        };
        config.settings.thumbnail_edge = Some(8);

        let err = bootstrap(config).await.err().unwrap();
        assert_eq!(CliError::exit_code_of(&err), 78);
    }
}

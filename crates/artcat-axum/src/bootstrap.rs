//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the web adapter. All concrete implementations are instantiated here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use artcat_core::paths::ResolvedPaths;
use artcat_core::services::AppCore;
use artcat_core::{CatalogSettings, Media, validate_settings};
use artcat_db::{CoreFactory, setup_database};
use artcat_export::OnePagerRenderer;
use artcat_media::{FsMediaStorage, ThumbnailProcessor};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Data directory override; `None` resolves from the environment.
    pub data_dir: Option<PathBuf>,
    /// Catalog settings handed to the services.
    pub settings: CatalogSettings,
    /// Run a media reconciliation pass before serving.
    pub reconcile_on_start: bool,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create config with default settings and resolved paths.
    pub fn with_defaults() -> Self {
        let settings = CatalogSettings::with_defaults();
        Self {
            port: settings.effective_port(),
            data_dir: None,
            settings,
            reconcile_on_start: true,
            cors: CorsConfig::default(),
        }
    }

    /// Use a specific data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(path.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    fn resolve_paths(&self) -> Result<ResolvedPaths> {
        Ok(match &self.data_dir {
            Some(dir) => ResolvedPaths::under(dir),
            None => ResolvedPaths::resolve(None)?,
        })
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The core application facade.
    pub core: Arc<AppCore>,
    /// Where the database and media tree live.
    pub paths: ResolvedPaths,
}

/// Bootstrap the catalog: resolve paths, open the database, wire the
/// media adapters and reconcile the media tree.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    validate_settings(&config.settings)?;

    let paths = config.resolve_paths()?;
    paths.ensure()?;

    tracing::info!(
        target: "artcat.paths",
        data_root = %paths.data_root.display(),
        database_path = %paths.database_path.display(),
        media_root = %paths.media_root.display(),
        "Axum bootstrap resolved paths"
    );

    // 1. Create database pool with full schema setup
    let pool = setup_database(&paths.database_path)
        .await
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
    let core = Arc::new(CoreFactory::build_app_core(
        pool,
        media,
        config.settings.clone(),
    ));

    // 4. Clear leftovers of interrupted uploads and deletes
    if config.reconcile_on_start {
        if let Err(e) = core.images().reconcile().await {
            tracing::warn!(target: "artcat.media", error = %e, "Startup media reconciliation failed");
        }
    }

    Ok(AxumContext { core, paths })
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config).await?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(
        artist = config.settings.effective_artist_name(),
        api_key = config.settings.effective_api_key().is_some(),
        "artcat web server listening on http://{}",
        addr
    );

    axum::serve(listener, app).await?;
    Ok(())
}

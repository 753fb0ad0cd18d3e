//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! Construction only; no domain logic lives here.

use sqlx::SqlitePool;
use std::sync::Arc;

use artcat_core::services::AppCore;
use artcat_core::{CatalogSettings, Media, Repos};

use crate::repositories::{SqliteArtworkRepository, SqliteImageRepository};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// Returns a `Repos` struct from `artcat-core` containing trait-object-wrapped
    /// repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteArtworkRepository::new(pool.clone())),
            Arc::new(SqliteImageRepository::new(pool)),
        )
    }

    /// Build a complete `AppCore` from a pool, media adapters and settings.
    ///
    /// ```ignore
    /// let pool = setup_database(&paths.database_path).await?;
    /// let core = CoreFactory::build_app_core(pool, media, settings);
    /// ```
    pub fn build_app_core(pool: SqlitePool, media: Media, settings: CatalogSettings) -> AppCore {
        AppCore::new(Self::build_repos(pool), media, settings)
    }
}

/// Test database helper for integration tests.
///
/// [`TestDb::new`] gives an in-memory `SQLite` database with the production
/// schema. [`TestDb::on_disk`] opens a WAL file database in a temporary
/// directory, for tests that need several connections at once.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
    _dir: Option<tempfile::TempDir>,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool, _dir: None })
    }

    /// Create a file-backed test database, removed on drop.
    pub async fn on_disk() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let pool = crate::setup::setup_database(&dir.path().join("catalog.db")).await?;
        Ok(Self {
            pool,
            _dir: Some(dir),
        })
    }

    /// Repositories backed by this database.
    pub fn repos(&self) -> Repos {
        CoreFactory::build_repos(self.pool.clone())
    }
}

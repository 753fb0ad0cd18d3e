//! Artwork service - identifier allocation, edits and search.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::domain::{
    Artwork, ArtworkFilter, ArtworkId, ArtworkQuery, ArtworkUpdate, NewArtwork, Pagination,
};
use crate::ports::{ArtworkRepository, CoreError, RepositoryError};
use crate::settings::CatalogSettings;

/// How many times a generated identifier is retried after losing a race.
pub const MAX_ID_ATTEMPTS: usize = 8;

/// Service for artwork records.
///
/// Owns identifier generation and the configured artist name. Image files
/// are not touched here; see `CatalogService` for cascading operations.
#[derive(Clone)]
pub struct ArtworkService {
    repo: Arc<dyn ArtworkRepository>,
    artist: Arc<str>,
    max_page_size: u32,
}

impl ArtworkService {
    pub fn new(repo: Arc<dyn ArtworkRepository>, settings: &CatalogSettings) -> Self {
        Self {
            repo,
            artist: Arc::from(settings.effective_artist_name()),
            max_page_size: settings.effective_max_page_size(),
        }
    }

    /// Artist attributed to new artworks.
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Create an artwork.
    ///
    /// A caller-supplied identifier is inserted as-is and fails with
    /// `AlreadyExists` if taken. Otherwise the next identifier is computed
    /// from the existing ones and re-computed if a concurrent insert wins.
    pub async fn create(&self, fields: &NewArtwork) -> Result<Artwork, CoreError> {
        let requested = fields.requested_id()?;
        let now = Utc::now();

        if let Some(id) = requested {
            let artwork = Artwork::from_new(id, fields, &self.artist, now);
            artwork.validate()?;
            self.repo.insert(&artwork).await?;
            return Ok(artwork);
        }

        // Validate before touching the store so a bad title costs nothing.
        Artwork::from_new(ArtworkId::first(), fields, &self.artist, now).validate()?;

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let existing = self.repo.list_ids().await?;
            let id = ArtworkId::next_after(existing.iter().map(ArtworkId::as_str));
            let artwork = Artwork::from_new(id, fields, &self.artist, now);

            match self.repo.insert(&artwork).await {
                Ok(()) => return Ok(artwork),
                Err(RepositoryError::AlreadyExists(_)) => {
                    debug!(id = %artwork.id, attempt, "Generated artwork id taken, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(CoreError::Internal(format!(
            "could not allocate an artwork id after {MAX_ID_ATTEMPTS} attempts"
        )))
    }

    /// Get an artwork by identifier.
    pub async fn get(&self, id: &ArtworkId) -> Result<Artwork, CoreError> {
        self.repo.get(id).await.map_err(CoreError::from)
    }

    /// Parse an identifier taken from a URL or command line.
    ///
    /// A string that cannot be an identifier cannot name an artwork, so it
    /// is reported as not found rather than invalid.
    pub fn resolve_id(raw: &str) -> Result<ArtworkId, CoreError> {
        ArtworkId::parse(raw)
            .map_err(|_| CoreError::from(RepositoryError::NotFound(format!("artwork {raw}"))))
    }

    /// Apply a partial edit. The identifier and artist never change.
    pub async fn update(
        &self,
        id: &ArtworkId,
        update: &ArtworkUpdate,
    ) -> Result<Artwork, CoreError> {
        let mut artwork = self.repo.get(id).await?;
        artwork.apply(update);
        artwork.validate()?;
        self.repo.update(&artwork).await?;
        Ok(artwork)
    }

    /// Delete the artwork record. Image records cascade in the store.
    pub async fn delete(&self, id: &ArtworkId) -> Result<(), CoreError> {
        self.repo.delete(id).await.map_err(CoreError::from)
    }

    /// Filtered, ordered page of artworks.
    ///
    /// A range with `min > max` yields an empty result without a query.
    pub async fn search(&self, query: ArtworkQuery) -> Result<Vec<Artwork>, CoreError> {
        let query = self.prepare(query)?;
        if query.filter.is_unsatisfiable() {
            return Ok(Vec::new());
        }
        self.repo.search(&query).await.map_err(CoreError::from)
    }

    /// Number of artworks matching a filter.
    pub async fn count(&self, filter: ArtworkFilter) -> Result<u64, CoreError> {
        let filter = filter.normalized();
        filter.validate()?;
        if filter.is_unsatisfiable() {
            return Ok(0);
        }
        self.repo.count(&filter).await.map_err(CoreError::from)
    }

    /// The page window that `search` will actually use.
    ///
    /// Without a limit every match after `offset` is returned; an explicit
    /// limit is capped at the configured maximum.
    pub fn effective_page(&self, page: Pagination) -> Pagination {
        page.clamped(self.max_page_size)
    }

    fn prepare(&self, query: ArtworkQuery) -> Result<ArtworkQuery, CoreError> {
        let filter = query.filter.normalized();
        filter.validate()?;
        Ok(ArtworkQuery {
            filter,
            sort: query.sort,
            page: self.effective_page(query.page),
        })
    }
}

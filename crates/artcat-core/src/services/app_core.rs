//! `AppCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters (CLI, Web)
//! receive an `AppCore` instance and use it to access all functionality.

use crate::ports::{Media, Repos};
use crate::settings::CatalogSettings;

use super::{ArtworkService, CatalogService, ImageService};

/// The core application facade.
///
/// # Example
///
/// ```ignore
/// let repos = artcat_db::CoreFactory::build_repos(&pool);
/// let media = Media::new(storage, processor, renderer);
/// let core = AppCore::new(repos, media, settings);
///
/// let page = core.catalog().search(ArtworkQuery::default()).await?;
/// ```
pub struct AppCore {
    artworks: ArtworkService,
    images: ImageService,
    catalog: CatalogService,
    settings: CatalogSettings,
}

impl AppCore {
    pub fn new(repos: Repos, media: Media, settings: CatalogSettings) -> Self {
        let artworks = ArtworkService::new(repos.artworks, &settings);
        let images = ImageService::new(repos.images, media.storage, media.processor);
        let catalog = CatalogService::new(artworks.clone(), images.clone(), media.renderer);
        Self {
            artworks,
            images,
            catalog,
            settings,
        }
    }

    /// Access the artwork service.
    pub const fn artworks(&self) -> &ArtworkService {
        &self.artworks
    }

    /// Access the image service.
    pub const fn images(&self) -> &ImageService {
        &self.images
    }

    /// Access the catalog use cases.
    pub const fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    /// Settings the services were built with.
    pub const fn settings(&self) -> &CatalogSettings {
        &self.settings
    }
}

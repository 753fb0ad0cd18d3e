//! Catalog service - use cases spanning artworks, images and exports.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::{ArtworkService, ImageService};
use crate::domain::{
    Artwork, ArtworkId, ArtworkQuery, DeletedImage, Image, ImageUpload, NewArtwork, UploadOutcome,
};
use crate::ports::{CoreError, DocumentRenderer, OnePager, RepositoryError};

/// An artwork with all of its images.
#[derive(Debug, Clone, Serialize)]
pub struct ArtworkDetail {
    #[serde(flatten)]
    pub artwork: Artwork,
    pub images: Vec<Image>,
    pub primary_image_id: Option<Uuid>,
}

impl ArtworkDetail {
    pub fn primary(&self) -> Option<&Image> {
        self.images.iter().find(|i| i.is_primary)
    }
}

/// An artwork in a listing, with its primary image if any.
#[derive(Debug, Clone, Serialize)]
pub struct ListedArtwork {
    #[serde(flatten)]
    pub artwork: Artwork,
    pub primary_image: Option<Image>,
}

/// One page of search results.
#[derive(Debug, Clone, Serialize)]
pub struct ArtworkPage {
    pub items: Vec<ListedArtwork>,
    /// Matches ignoring pagination.
    pub total: u64,
    pub offset: u32,
    pub limit: Option<u32>,
}

/// Result of creating an artwork together with its images.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedArtwork {
    pub artwork: Artwork,
    pub uploads: Vec<UploadOutcome>,
}

/// Orchestrates multi-step catalog operations.
#[derive(Clone)]
pub struct CatalogService {
    artworks: ArtworkService,
    images: ImageService,
    renderer: Arc<dyn DocumentRenderer>,
}

impl CatalogService {
    pub fn new(
        artworks: ArtworkService,
        images: ImageService,
        renderer: Arc<dyn DocumentRenderer>,
    ) -> Self {
        Self {
            artworks,
            images,
            renderer,
        }
    }

    /// Create an artwork, then attempt each upload independently.
    ///
    /// The artwork is committed before any image is processed; an image
    /// failure is reported at its index and never rolls the artwork back.
    pub async fn create_with_images(
        &self,
        fields: &NewArtwork,
        uploads: Vec<ImageUpload>,
    ) -> Result<CreatedArtwork, CoreError> {
        let artwork = self.artworks.create(fields).await?;
        info!(id = %artwork.id, title = %artwork.title, "Created artwork");
        let uploads = self.store_uploads(&artwork.id, uploads).await;
        Ok(CreatedArtwork { artwork, uploads })
    }

    /// Attach uploads to an existing artwork.
    pub async fn attach_images(
        &self,
        artwork_id: &ArtworkId,
        uploads: Vec<ImageUpload>,
    ) -> Result<Vec<UploadOutcome>, CoreError> {
        self.artworks.get(artwork_id).await?;
        Ok(self.store_uploads(artwork_id, uploads).await)
    }

    async fn store_uploads(
        &self,
        artwork_id: &ArtworkId,
        uploads: Vec<ImageUpload>,
    ) -> Vec<UploadOutcome> {
        let mut outcomes = Vec::with_capacity(uploads.len());
        for (index, upload) in uploads.into_iter().enumerate() {
            let file_name = upload.file_name.clone();
            match self.images.add(artwork_id, upload).await {
                Ok(image) => outcomes.push(UploadOutcome::stored(index, &image)),
                Err(e) => {
                    warn!(
                        artwork_id = %artwork_id,
                        index,
                        file_name = file_name.as_deref().unwrap_or(""),
                        error = %e,
                        "Image upload rejected"
                    );
                    outcomes.push(UploadOutcome::failed(index, file_name, e));
                }
            }
        }
        outcomes
    }

    /// Artwork, its ordered images and the primary image id.
    pub async fn detail(&self, id: &ArtworkId) -> Result<ArtworkDetail, CoreError> {
        let artwork = self.artworks.get(id).await?;
        let images = self.images.list_for_artwork(id).await?;
        let primary_image_id = images.iter().find(|i| i.is_primary).map(|i| i.id);
        Ok(ArtworkDetail {
            artwork,
            images,
            primary_image_id,
        })
    }

    /// Delete an artwork, its image records and its files.
    ///
    /// Only the files of the records removed here are deleted, so an upload
    /// that lands in a reused folder afterwards keeps its files.
    pub async fn delete_artwork(&self, id: &ArtworkId) -> Result<(), CoreError> {
        let images = self.images.list_for_artwork(id).await?;
        self.artworks.delete(id).await?;
        self.images.purge_files(id, &images).await;
        info!(id = %id, "Deleted artwork");
        Ok(())
    }

    /// Delete an image; when `owner` is given the image must belong to it.
    pub async fn delete_image(
        &self,
        owner: Option<&ArtworkId>,
        image_id: Uuid,
    ) -> Result<DeletedImage, CoreError> {
        self.owned_image(owner, image_id).await?;
        self.images.delete(image_id).await
    }

    /// Make an image primary; when `owner` is given the image must belong to it.
    pub async fn set_primary(
        &self,
        owner: Option<&ArtworkId>,
        image_id: Uuid,
    ) -> Result<Image, CoreError> {
        self.owned_image(owner, image_id).await?;
        self.images.set_primary(image_id).await
    }

    async fn owned_image(&self, owner: Option<&ArtworkId>, image_id: Uuid) -> Result<Image, CoreError> {
        let image = self.images.get(image_id).await?;
        match owner {
            Some(owner) if *owner != image.artwork_id => Err(RepositoryError::NotFound(format!(
                "image {image_id} of artwork {owner}"
            ))
            .into()),
            _ => Ok(image),
        }
    }

    /// Search with primary images and the total match count.
    pub async fn search(&self, query: ArtworkQuery) -> Result<ArtworkPage, CoreError> {
        let page = self.artworks.effective_page(query.page);
        let total = self.artworks.count(query.filter.clone()).await?;
        let artworks = self.artworks.search(query).await?;

        let ids: Vec<ArtworkId> = artworks.iter().map(|a| a.id.clone()).collect();
        let mut primaries: HashMap<ArtworkId, Image> = self
            .images
            .primaries(&ids)
            .await?
            .into_iter()
            .map(|i| (i.artwork_id.clone(), i))
            .collect();

        let items = artworks
            .into_iter()
            .map(|artwork| ListedArtwork {
                primary_image: primaries.remove(&artwork.id),
                artwork,
            })
            .collect();

        Ok(ArtworkPage {
            items,
            total,
            offset: page.offset,
            limit: page.limit,
        })
    }

    /// Render the one-page PDF sheet of an artwork.
    pub async fn export_onepager(&self, id: &ArtworkId) -> Result<Vec<u8>, CoreError> {
        let detail = self.detail(id).await?;
        let primary_image = match detail.primary() {
            Some(image) => Some(self.images.read_original(image).await?),
            None => None,
        };

        let sheet = OnePager {
            artwork: detail.artwork,
            primary_image,
        };
        let renderer = Arc::clone(&self.renderer);
        let pdf = tokio::task::spawn_blocking(move || renderer.render(&sheet)).await??;
        Ok(pdf)
    }
}

//! Image service - two-phase file/record writes and media reconciliation.
//!
//! Files are written before the record is inserted and removed only after
//! the record delete committed. A crash between the two phases leaves
//! orphan files, never records without files; `reconcile` cleans those up.
//!
//! Writers share a read lock on the media tree for the span of both phases.
//! `reconcile` takes the write lock, so it never sees a file whose record
//! is still on its way into the database.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{ArtworkId, DeletedImage, Image, ImageUpload, NewImage};
use crate::ports::{CoreError, ImageProcessor, ImageRepository, MediaStorage};

/// Record whose file is gone from the media tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingMedia {
    pub image_id: Uuid,
    pub artwork_id: ArtworkId,
    pub path: String,
}

/// What a reconciliation pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Files removed because no record references them.
    pub orphans_removed: Vec<String>,
    pub temp_files_removed: usize,
    pub empty_dirs_removed: usize,
    /// Records that reference missing files. Reported, not repaired.
    pub missing: Vec<MissingMedia>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.orphans_removed.is_empty()
            && self.temp_files_removed == 0
            && self.empty_dirs_removed == 0
            && self.missing.is_empty()
    }
}

/// Service for image records and their files.
#[derive(Clone)]
pub struct ImageService {
    repo: Arc<dyn ImageRepository>,
    storage: Arc<dyn MediaStorage>,
    processor: Arc<dyn ImageProcessor>,
    media_lock: Arc<RwLock<()>>,
}

impl ImageService {
    pub fn new(
        repo: Arc<dyn ImageRepository>,
        storage: Arc<dyn MediaStorage>,
        processor: Arc<dyn ImageProcessor>,
    ) -> Self {
        Self {
            repo,
            storage,
            processor,
            media_lock: Arc::new(RwLock::new(())),
        }
    }

    /// Decode, store and record one upload.
    ///
    /// Fails with `MediaError::InvalidImage` before anything is written if
    /// the bytes do not decode.
    pub async fn add(&self, artwork_id: &ArtworkId, upload: ImageUpload) -> Result<Image, CoreError> {
        let ImageUpload {
            bytes,
            file_name,
            is_primary,
        } = upload;

        let processor = Arc::clone(&self.processor);
        let (bytes, processed) = tokio::task::spawn_blocking(move || {
            let processed = processor.process(&bytes);
            (bytes, processed)
        })
        .await?;
        let processed = processed?;

        let _writing = self.media_lock.read().await;
        let image_id = Uuid::new_v4();
        let stored = self
            .storage
            .store(
                artwork_id,
                image_id,
                &processed.extension,
                &bytes,
                &processed.thumbnail,
            )
            .await?;

        let record = NewImage {
            id: image_id,
            artwork_id: artwork_id.clone(),
            original_path: stored.original_path.clone(),
            thumb_path: stored.thumb_path.clone(),
            file_name: file_name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            format: processed.extension,
            width: processed.width,
            height: processed.height,
            wants_primary: is_primary,
            created_at: Utc::now(),
        };

        match self.repo.insert(&record).await {
            Ok(image) => {
                info!(
                    target: "artcat.media",
                    artwork_id = %artwork_id,
                    image_id = %image.id,
                    primary = image.is_primary,
                    "Stored image"
                );
                Ok(image)
            }
            Err(e) => {
                self.remove_files(&[stored.original_path.as_str(), stored.thumb_path.as_str()])
                    .await;
                Err(e.into())
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Image, CoreError> {
        self.repo.get(id).await.map_err(CoreError::from)
    }

    /// Images of an artwork, primary first.
    pub async fn list_for_artwork(&self, artwork_id: &ArtworkId) -> Result<Vec<Image>, CoreError> {
        self.repo
            .list_for_artwork(artwork_id)
            .await
            .map_err(CoreError::from)
    }

    pub async fn primaries(&self, artwork_ids: &[ArtworkId]) -> Result<Vec<Image>, CoreError> {
        if artwork_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repo
            .primaries(artwork_ids)
            .await
            .map_err(CoreError::from)
    }

    pub async fn set_primary(&self, id: Uuid) -> Result<Image, CoreError> {
        self.repo.set_primary(id).await.map_err(CoreError::from)
    }

    /// Delete the record, then its files.
    pub async fn delete(&self, id: Uuid) -> Result<DeletedImage, CoreError> {
        let _writing = self.media_lock.read().await;
        let deleted = self.repo.delete(id).await?;
        self.remove_files(&[
            deleted.image.original_path.as_str(),
            deleted.image.thumb_path.as_str(),
        ])
            .await;
        if let Some(promoted) = deleted.promoted {
            info!(
                target: "artcat.media",
                artwork_id = %deleted.image.artwork_id,
                promoted = %promoted,
                "Promoted replacement primary image"
            );
        }
        Ok(deleted)
    }

    /// Remove the files of images whose records are already gone, then the
    /// artwork folder if nothing else was stored there since.
    pub async fn purge_files(&self, artwork_id: &ArtworkId, images: &[Image]) {
        let _writing = self.media_lock.read().await;
        for image in images {
            self.remove_files(&[image.original_path.as_str(), image.thumb_path.as_str()])
                .await;
        }
        match self.storage.remove_artwork_dir(artwork_id).await {
            Ok(true) => {}
            Ok(false) => info!(
                target: "artcat.media",
                artwork_id = %artwork_id,
                "Artwork folder still holds newer files; left in place"
            ),
            Err(e) => warn!(
                target: "artcat.media",
                artwork_id = %artwork_id,
                error = %e,
                "Failed to remove artwork folder; reconcile will retry"
            ),
        }
    }

    /// Read the original file of an image.
    pub async fn read_original(&self, image: &Image) -> Result<Vec<u8>, CoreError> {
        self.storage
            .read(&image.original_path)
            .await
            .map_err(CoreError::from)
    }

    /// Bring the media tree in line with the image records.
    ///
    /// Waits for in-flight uploads and deletes, and holds them off until
    /// the pass is done.
    pub async fn reconcile(&self) -> Result<ReconcileReport, CoreError> {
        let _exclusive = self.media_lock.write().await;
        let mut report = ReconcileReport {
            temp_files_removed: self.storage.cleanup_temp_files().await?,
            ..ReconcileReport::default()
        };

        let records = self.repo.list_all().await?;
        let mut known: HashSet<&str> = HashSet::with_capacity(records.len() * 2);
        for image in &records {
            known.insert(&image.original_path);
            known.insert(&image.thumb_path);
        }

        for file in self.storage.list_files().await? {
            if known.contains(file.as_str()) {
                continue;
            }
            self.storage.remove(&file).await?;
            report.orphans_removed.push(file);
        }

        for image in &records {
            for path in [&image.original_path, &image.thumb_path] {
                if !self.storage.exists(path).await? {
                    report.missing.push(MissingMedia {
                        image_id: image.id,
                        artwork_id: image.artwork_id.clone(),
                        path: path.clone(),
                    });
                }
            }
        }

        report.empty_dirs_removed = self.storage.prune_empty_dirs().await?;

        info!(
            target: "artcat.media",
            orphans = report.orphans_removed.len(),
            temp_files = report.temp_files_removed,
            empty_dirs = report.empty_dirs_removed,
            missing = report.missing.len(),
            "Media reconciliation finished"
        );
        for missing in &report.missing {
            warn!(
                target: "artcat.media",
                image_id = %missing.image_id,
                path = %missing.path,
                "Image record references a missing file"
            );
        }

        Ok(report)
    }

    async fn remove_files(&self, paths: &[&str]) {
        for path in paths {
            if let Err(e) = self.storage.remove(path).await {
                warn!(
                    target: "artcat.media",
                    path = %path,
                    error = %e,
                    "Failed to remove media file; reconcile will retry"
                );
            }
        }
    }
}

//! Filesystem media storage.
//!
//! Layout below the media root:
//!
//! ```text
//! artworks/<artwork_id>/<image_id>.<ext>
//! artworks/<artwork_id>/thumbs/<image_id>_thumb.jpg
//! ```
//!
//! Files are written to `<name>.tmp` and renamed into place, so a reader
//! never sees a partial file.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use artcat_core::{ArtworkId, MediaError, MediaStorage, StoredMedia};

/// Directory below the media root holding per-artwork folders.
pub const ARTWORKS_DIR: &str = "artworks";

/// Per-artwork thumbnail folder.
pub const THUMBS_DIR: &str = "thumbs";

/// Extension of in-flight writes.
pub const TEMP_EXTENSION: &str = "tmp";

fn io_err(path: &Path, e: &std::io::Error) -> MediaError {
    MediaError::Io(format!("{}: {e}", path.display()))
}

fn is_temp(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == TEMP_EXTENSION)
}

/// Media storage rooted at a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsMediaStorage {
    root: PathBuf,
}

impl FsMediaStorage {
    /// Create a storage rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative path of an original.
    pub fn original_path(artwork_id: &ArtworkId, image_id: Uuid, extension: &str) -> String {
        format!("{ARTWORKS_DIR}/{artwork_id}/{image_id}.{extension}")
    }

    /// Relative path of a thumbnail.
    pub fn thumb_path(artwork_id: &ArtworkId, image_id: Uuid) -> String {
        format!("{ARTWORKS_DIR}/{artwork_id}/{THUMBS_DIR}/{image_id}_thumb.jpg")
    }

    /// Map a relative path to an absolute one, refusing anything that
    /// would leave the media root.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, MediaError> {
        let candidate = Path::new(relative);
        if relative.is_empty()
            || !candidate
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(MediaError::InvalidPath(relative.to_string()));
        }
        Ok(self.root.join(candidate))
    }

    fn relative(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<&str> = rel
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }

    async fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), MediaError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_err(parent, &e))?;
        }

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".");
        temp_name.push(TEMP_EXTENSION);
        let temp_path = PathBuf::from(temp_name);

        let result = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(data).await?;
            file.sync_all().await?;
            fs::rename(&temp_path, path).await
        }
        .await;

        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path).await;
            return Err(io_err(path, &e));
        }
        Ok(())
    }

    /// Every file and directory below the root, directories with their depth.
    async fn walk(&self) -> Result<(Vec<PathBuf>, Vec<(usize, PathBuf)>), MediaError> {
        let mut files = Vec::new();
        let mut dirs = Vec::new();

        if !fs::try_exists(&self.root)
            .await
            .map_err(|e| io_err(&self.root, &e))?
        {
            return Ok((files, dirs));
        }

        let mut pending = vec![(0usize, self.root.clone())];
        while let Some((depth, dir)) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await.map_err(|e| io_err(&dir, &e))?;
            while let Some(entry) = entries.next_entry().await.map_err(|e| io_err(&dir, &e))? {
                let path = entry.path();
                let file_type = entry.file_type().await.map_err(|e| io_err(&path, &e))?;
                if file_type.is_dir() {
                    dirs.push((depth + 1, path.clone()));
                    pending.push((depth + 1, path));
                } else if file_type.is_file() {
                    files.push(path);
                }
            }
        }

        Ok((files, dirs))
    }
}

#[async_trait]
impl MediaStorage for FsMediaStorage {
    async fn store(
        &self,
        artwork_id: &ArtworkId,
        image_id: Uuid,
        extension: &str,
        original: &[u8],
        thumbnail: &[u8],
    ) -> Result<StoredMedia, MediaError> {
        let stored = StoredMedia {
            original_path: Self::original_path(artwork_id, image_id, extension),
            thumb_path: Self::thumb_path(artwork_id, image_id),
        };
        let original_abs = self.resolve(&stored.original_path)?;
        let thumb_abs = self.resolve(&stored.thumb_path)?;

        self.write_atomic(&original_abs, original).await?;
        if let Err(e) = self.write_atomic(&thumb_abs, thumbnail).await {
            let _ = fs::remove_file(&original_abs).await;
            return Err(e);
        }

        debug!(
            target: "artcat.media",
            original = %stored.original_path,
            thumb = %stored.thumb_path,
            "Wrote media files"
        );
        Ok(stored)
    }

    async fn read(&self, relative: &str) -> Result<Vec<u8>, MediaError> {
        let path = self.resolve(relative)?;
        fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => MediaError::NotFound(relative.to_string()),
            _ => io_err(&path, &e),
        })
    }

    async fn exists(&self, relative: &str) -> Result<bool, MediaError> {
        let path = self.resolve(relative)?;
        fs::try_exists(&path).await.map_err(|e| io_err(&path, &e))
    }

    async fn remove(&self, relative: &str) -> Result<(), MediaError> {
        let path = self.resolve(relative)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(&path, &e)),
        }
    }

    async fn remove_artwork_dir(&self, artwork_id: &ArtworkId) -> Result<bool, MediaError> {
        let dir = format!("{ARTWORKS_DIR}/{artwork_id}");
        for relative in [format!("{dir}/{THUMBS_DIR}"), dir] {
            let path = self.resolve(&relative)?;
            match fs::remove_dir(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) if e.kind() == ErrorKind::DirectoryNotEmpty => return Ok(false),
                Err(e) => return Err(io_err(&path, &e)),
            }
        }
        Ok(true)
    }

    async fn list_files(&self) -> Result<Vec<String>, MediaError> {
        let (files, _) = self.walk().await?;
        let mut listed: Vec<String> = files
            .iter()
            .filter(|p| !is_temp(p))
            .filter_map(|p| self.relative(p))
            .collect();
        listed.sort();
        Ok(listed)
    }

    async fn cleanup_temp_files(&self) -> Result<usize, MediaError> {
        let (files, _) = self.walk().await?;
        let mut cleaned = 0;
        for path in files.iter().filter(|p| is_temp(p)) {
            fs::remove_file(path).await.map_err(|e| io_err(path, &e))?;
            cleaned += 1;
        }
        Ok(cleaned)
    }

    async fn prune_empty_dirs(&self) -> Result<usize, MediaError> {
        let (_, mut dirs) = self.walk().await?;
        // Deepest first so a parent sees its children already gone.
        dirs.sort_by(|a, b| b.0.cmp(&a.0));

        let mut pruned = 0;
        for (_, dir) in dirs {
            let mut entries = fs::read_dir(&dir).await.map_err(|e| io_err(&dir, &e))?;
            let empty = entries
                .next_entry()
                .await
                .map_err(|e| io_err(&dir, &e))?
                .is_none();
            if empty {
                fs::remove_dir(&dir).await.map_err(|e| io_err(&dir, &e))?;
                pruned += 1;
            }
        }
        Ok(pruned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> (tempfile::TempDir, FsMediaStorage) {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FsMediaStorage::new(tmp.path().join("media"));
        (tmp, storage)
    }

    #[tokio::test]
    async fn test_store_writes_both_files() {
        let (_tmp, storage) = storage();
        let artwork_id = ArtworkId::first();
        let image_id = Uuid::new_v4();

        let stored = storage
            .store(&artwork_id, image_id, "png", b"original", b"thumb")
            .await
            .unwrap();

        assert_eq!(
            stored.original_path,
            format!("artworks/A0001/{image_id}.png")
        );
        assert_eq!(
            stored.thumb_path,
            format!("artworks/A0001/thumbs/{image_id}_thumb.jpg")
        );
        assert_eq!(storage.read(&stored.original_path).await.unwrap(), b"original");
        assert_eq!(storage.read(&stored.thumb_path).await.unwrap(), b"thumb");
        assert_eq!(storage.cleanup_temp_files().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_resolve_rejects_escapes() {
        let (_tmp, storage) = storage();
        for bad in ["../secret", "/etc/passwd", "artworks/../../x", ""] {
            assert!(matches!(
                storage.resolve(bad),
                Err(MediaError::InvalidPath(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_remove_missing_is_ok() {
        let (_tmp, storage) = storage();
        storage.remove("artworks/A0001/nothing.png").await.unwrap();
        assert!(matches!(
            storage.read("artworks/A0001/nothing.png").await,
            Err(MediaError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_skips_temp_and_cleanup_removes_them() {
        let (_tmp, storage) = storage();
        let artwork_id = ArtworkId::first();
        let stored = storage
            .store(&artwork_id, Uuid::new_v4(), "png", b"o", b"t")
            .await
            .unwrap();
        let stray = storage.root().join("artworks/A0001/half.png.tmp");
        fs::write(&stray, b"partial").await.unwrap();

        let listed = storage.list_files().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.contains(&stored.original_path));

        assert_eq!(storage.cleanup_temp_files().await.unwrap(), 1);
        assert!(!stray.exists());
    }

    #[tokio::test]
    async fn test_prune_empty_dirs() {
        let (_tmp, storage) = storage();
        let keep = ArtworkId::first();
        let gone = ArtworkId::from_sequence(2);
        storage
            .store(&keep, Uuid::new_v4(), "png", b"o", b"t")
            .await
            .unwrap();
        let stored = storage
            .store(&gone, Uuid::new_v4(), "png", b"o", b"t")
            .await
            .unwrap();

        storage.remove(&stored.original_path).await.unwrap();
        storage.remove(&stored.thumb_path).await.unwrap();
        // artworks/A0002 and artworks/A0002/thumbs are now empty.
        assert_eq!(storage.prune_empty_dirs().await.unwrap(), 2);
        assert!(!storage.root().join("artworks/A0002").exists());
        assert!(storage.root().join("artworks/A0001/thumbs").exists());

        assert!(storage.remove_artwork_dir(&gone).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_artwork_dir_keeps_files() {
        let (_tmp, storage) = storage();
        let id = ArtworkId::first();
        let old = storage
            .store(&id, Uuid::new_v4(), "png", b"o", b"t")
            .await
            .unwrap();
        let fresh = storage
            .store(&id, Uuid::new_v4(), "png", b"o", b"t")
            .await
            .unwrap();

        storage.remove(&old.original_path).await.unwrap();
        storage.remove(&old.thumb_path).await.unwrap();
        assert!(!storage.remove_artwork_dir(&id).await.unwrap());
        assert!(storage.exists(&fresh.original_path).await.unwrap());
        assert!(storage.exists(&fresh.thumb_path).await.unwrap());

        storage.remove(&fresh.original_path).await.unwrap();
        assert!(!storage.remove_artwork_dir(&id).await.unwrap());
        storage.remove(&fresh.thumb_path).await.unwrap();
        assert!(storage.remove_artwork_dir(&id).await.unwrap());
        assert!(!storage.root().join("artworks/A0001").exists());
    }

    #[tokio::test]
    async fn test_operations_on_missing_root() {
        let (_tmp, storage) = storage();
        assert!(storage.list_files().await.unwrap().is_empty());
        assert_eq!(storage.prune_empty_dirs().await.unwrap(), 0);
    }
}

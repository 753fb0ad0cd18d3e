//! `SQLite` implementation of the `ImageRepository` trait.
//!
//! Every mutation runs in one `BEGIN IMMEDIATE` transaction so the
//! primary-image invariant holds whenever the transaction commits. Taking
//! the write lock up front makes concurrent writers wait on the busy
//! timeout instead of failing when a read lock cannot be upgraded.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool, Transaction};
use uuid::Uuid;

use artcat_core::{ArtworkId, DeletedImage, Image, ImageRepository, NewImage, RepositoryError};

use super::row_mappers::{IMAGE_SELECT_COLUMNS, format_timestamp, row_to_image, storage};

/// `SQLite` implementation of the `ImageRepository` trait.
pub struct SqliteImageRepository {
    pool: SqlitePool,
}

impl SqliteImageRepository {
    /// Create a new `SQLite` image repository.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, RepositoryError> {
        self.pool.begin_with("BEGIN IMMEDIATE").await.map_err(storage)
    }
}

async fn fetch_image(conn: &mut SqliteConnection, id: Uuid) -> Result<Image, RepositoryError> {
    let query = format!("SELECT {IMAGE_SELECT_COLUMNS} FROM images WHERE id = ?");
    let row = sqlx::query(&query)
        .bind(id.to_string())
        .fetch_optional(conn)
        .await
        .map_err(storage)?
        .ok_or_else(|| RepositoryError::NotFound(format!("image {id}")))?;
    row_to_image(&row)
}

#[async_trait]
impl ImageRepository for SqliteImageRepository {
    async fn insert(&self, image: &NewImage) -> Result<Image, RepositoryError> {
        let mut tx = self.begin_write().await?;

        let artwork: Option<i64> = sqlx::query_scalar("SELECT 1 FROM artworks WHERE id = ?")
            .bind(image.artwork_id.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage)?;
        if artwork.is_none() {
            return Err(RepositoryError::NotFound(format!(
                "artwork {}",
                image.artwork_id
            )));
        }

        let primaries: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM images WHERE artwork_id = ? AND is_primary = 1",
        )
        .bind(image.artwork_id.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(storage)?;

        let is_primary = image.wants_primary || primaries == 0;
        if is_primary && primaries > 0 {
            sqlx::query("UPDATE images SET is_primary = 0 WHERE artwork_id = ? AND is_primary = 1")
                .bind(image.artwork_id.as_str())
                .execute(&mut *tx)
                .await
                .map_err(storage)?;
        }

        let result = sqlx::query(
            r"INSERT INTO images (
                id, artwork_id, original_path, thumb_path, file_name, format,
                width, height, is_primary, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(image.id.to_string())
        .bind(image.artwork_id.as_str())
        .bind(&image.original_path)
        .bind(&image.thumb_path)
        .bind(&image.file_name)
        .bind(&image.format)
        .bind(i64::from(image.width))
        .bind(i64::from(image.height))
        .bind(is_primary)
        .bind(format_timestamp(&image.created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepositoryError::AlreadyExists(format!("image {}", image.id))
            }
            other => storage(other),
        })?;

        tx.commit().await.map_err(storage)?;

        Ok(Image {
            id: image.id,
            artwork_id: image.artwork_id.clone(),
            original_path: image.original_path.clone(),
            thumb_path: image.thumb_path.clone(),
            file_name: image.file_name.clone(),
            format: image.format.clone(),
            width: image.width,
            height: image.height,
            is_primary,
            seq: result.last_insert_rowid(),
            created_at: image.created_at,
        })
    }

    async fn get(&self, id: Uuid) -> Result<Image, RepositoryError> {
        let mut conn = self.pool.acquire().await.map_err(storage)?;
        fetch_image(&mut conn, id).await
    }

    async fn list_for_artwork(&self, artwork_id: &ArtworkId) -> Result<Vec<Image>, RepositoryError> {
        let query = format!(
            "SELECT {IMAGE_SELECT_COLUMNS} FROM images WHERE artwork_id = ? ORDER BY is_primary DESC, seq ASC"
        );
        let rows = sqlx::query(&query)
            .bind(artwork_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        rows.iter().map(row_to_image).collect()
    }

    async fn primaries(&self, artwork_ids: &[ArtworkId]) -> Result<Vec<Image>, RepositoryError> {
        if artwork_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {IMAGE_SELECT_COLUMNS} FROM images WHERE is_primary = 1 AND artwork_id IN ("
        ));
        let mut separated = qb.separated(", ");
        for id in artwork_ids {
            separated.push_bind(id.as_str());
        }
        separated.push_unseparated(")");

        let rows = qb.build().fetch_all(&self.pool).await.map_err(storage)?;
        rows.iter().map(row_to_image).collect()
    }

    async fn list_all(&self) -> Result<Vec<Image>, RepositoryError> {
        let query = format!("SELECT {IMAGE_SELECT_COLUMNS} FROM images ORDER BY seq ASC");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        rows.iter().map(row_to_image).collect()
    }

    async fn set_primary(&self, id: Uuid) -> Result<Image, RepositoryError> {
        let mut tx = self.begin_write().await?;

        let image = fetch_image(&mut tx, id).await?;

        // Demote first; the partial unique index allows one primary at a time.
        sqlx::query("UPDATE images SET is_primary = 0 WHERE artwork_id = ? AND id != ?")
            .bind(image.artwork_id.as_str())
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(storage)?;
        sqlx::query("UPDATE images SET is_primary = 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        tx.commit().await.map_err(storage)?;

        Ok(Image {
            is_primary: true,
            ..image
        })
    }

    async fn delete(&self, id: Uuid) -> Result<DeletedImage, RepositoryError> {
        let mut tx = self.begin_write().await?;

        let image = fetch_image(&mut tx, id).await?;

        sqlx::query("DELETE FROM images WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        let mut promoted = None;
        if image.is_primary {
            let next: Option<String> = sqlx::query_scalar(
                "SELECT id FROM images WHERE artwork_id = ? ORDER BY seq ASC LIMIT 1",
            )
            .bind(image.artwork_id.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage)?;

            if let Some(next) = next {
                sqlx::query("UPDATE images SET is_primary = 1 WHERE id = ?")
                    .bind(&next)
                    .execute(&mut *tx)
                    .await
                    .map_err(storage)?;
                promoted = Some(Uuid::parse_str(&next).map_err(|e| {
                    RepositoryError::Serialization(format!("image id '{next}': {e}"))
                })?);
            }
        }

        tx.commit().await.map_err(storage)?;

        Ok(DeletedImage { image, promoted })
    }
}

//! `SQLite` implementation of the `ArtworkRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use artcat_core::{
    Artwork, ArtworkFilter, ArtworkId, ArtworkQuery, ArtworkRepository, RepositoryError,
};

use super::artwork_query::{count_query, search_query};
use super::row_mappers::{
    ARTWORK_SELECT_COLUMNS, format_timestamp, keywords_to_json, row_to_artwork, storage,
};

/// Numeric suffix stored next to generated ids so they sort by number.
/// `NULL` for caller-supplied ids in another format.
fn id_sequence(id: &ArtworkId) -> Option<i64> {
    id.sequence().and_then(|seq| i64::try_from(seq).ok())
}

/// `SQLite` implementation of the `ArtworkRepository` trait.
pub struct SqliteArtworkRepository {
    pool: SqlitePool,
}

impl SqliteArtworkRepository {
    /// Create a new `SQLite` artwork repository.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArtworkRepository for SqliteArtworkRepository {
    async fn list_ids(&self) -> Result<Vec<ArtworkId>, RepositoryError> {
        let ids: Vec<String> = sqlx::query_scalar("SELECT id FROM artworks")
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;

        ids.iter()
            .map(|id| {
                ArtworkId::parse(id).map_err(|e| RepositoryError::Serialization(e.to_string()))
            })
            .collect()
    }

    async fn get(&self, id: &ArtworkId) -> Result<Artwork, RepositoryError> {
        let query = format!("SELECT {ARTWORK_SELECT_COLUMNS} FROM artworks WHERE id = ?");

        let row = sqlx::query(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?
            .ok_or_else(|| RepositoryError::NotFound(format!("artwork {id}")))?;

        row_to_artwork(&row)
    }

    async fn insert(&self, artwork: &Artwork) -> Result<(), RepositoryError> {
        let keywords = keywords_to_json(&artwork.keywords)?;

        sqlx::query(
            r"INSERT INTO artworks (
                id, id_seq, title, artist, year, medium, surface, width_cm, height_cm,
                depth_cm, description, keywords, slug, search_text, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(artwork.id.as_str())
        .bind(id_sequence(&artwork.id))
        .bind(&artwork.title)
        .bind(&artwork.artist)
        .bind(artwork.year)
        .bind(&artwork.medium)
        .bind(&artwork.surface)
        .bind(artwork.width_cm)
        .bind(artwork.height_cm)
        .bind(artwork.depth_cm)
        .bind(&artwork.description)
        .bind(&keywords)
        .bind(&artwork.slug)
        .bind(artwork.search_text())
        .bind(format_timestamp(&artwork.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepositoryError::AlreadyExists(format!("artwork {}", artwork.id))
            }
            other => storage(other),
        })?;

        Ok(())
    }

    async fn update(&self, artwork: &Artwork) -> Result<(), RepositoryError> {
        let keywords = keywords_to_json(&artwork.keywords)?;

        let result = sqlx::query(
            "UPDATE artworks SET title = ?, year = ?, medium = ?, surface = ?, width_cm = ?, height_cm = ?, depth_cm = ?, description = ?, keywords = ?, slug = ?, search_text = ? WHERE id = ?",
        )
        .bind(&artwork.title)
        .bind(artwork.year)
        .bind(&artwork.medium)
        .bind(&artwork.surface)
        .bind(artwork.width_cm)
        .bind(artwork.height_cm)
        .bind(artwork.depth_cm)
        .bind(&artwork.description)
        .bind(&keywords)
        .bind(&artwork.slug)
        .bind(artwork.search_text())
        .bind(artwork.id.as_str())
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("artwork {}", artwork.id)));
        }

        Ok(())
    }

    async fn delete(&self, id: &ArtworkId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM artworks WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("artwork {id}")));
        }

        Ok(())
    }

    async fn search(&self, query: &ArtworkQuery) -> Result<Vec<Artwork>, RepositoryError> {
        let mut qb = search_query(query);
        let rows = qb.build().fetch_all(&self.pool).await.map_err(storage)?;
        rows.iter().map(row_to_artwork).collect()
    }

    async fn count(&self, filter: &ArtworkFilter) -> Result<u64, RepositoryError> {
        let mut qb = count_query(filter);
        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(storage)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;
    use artcat_core::{ArtworkSort, NewArtwork, Pagination};
    use chrono::Utc;

    async fn repo() -> SqliteArtworkRepository {
        SqliteArtworkRepository::new(setup_test_database().await.unwrap())
    }

    fn artwork(id: &str, title: &str) -> Artwork {
        Artwork::from_new(
            ArtworkId::parse(id).unwrap(),
            &NewArtwork::titled(title),
            "Jane Doe",
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;
        let mut record = artwork("A0001", "Harbour");
        record.keywords = ["sea".to_string(), "boats".to_string()].into();
        record.year = Some(2020);
        repo.insert(&record).await.unwrap();

        let loaded = repo.get(&record.id).await.unwrap();
        assert_eq!(loaded.title, "Harbour");
        assert_eq!(loaded.year, Some(2020));
        assert_eq!(loaded.keywords, record.keywords);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_already_exists() {
        let repo = repo().await;
        repo.insert(&artwork("A0001", "One")).await.unwrap();
        let err = repo.insert(&artwork("A0001", "Two")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = repo().await;
        let missing = artwork("A0404", "Ghost");
        assert!(matches!(
            repo.update(&missing).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete(&missing.id).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_search_pages_and_sorts() {
        let repo = repo().await;
        for (id, title, year) in [
            ("A0001", "Beta", Some(2001)),
            ("A0002", "alpha", None),
            ("A0003", "Gamma", Some(1999)),
        ] {
            let mut record = artwork(id, title);
            record.year = year;
            repo.insert(&record).await.unwrap();
        }

        let titles = |items: Vec<Artwork>| items.into_iter().map(|a| a.title).collect::<Vec<_>>();

        let by_title = repo
            .search(&ArtworkQuery::default().sorted(ArtworkSort::TitleAsc))
            .await
            .unwrap();
        assert_eq!(titles(by_title), vec!["alpha", "Beta", "Gamma"]);

        let by_year = repo
            .search(&ArtworkQuery::default().sorted(ArtworkSort::YearAsc))
            .await
            .unwrap();
        assert_eq!(titles(by_year), vec!["Gamma", "Beta", "alpha"]);

        let page = repo
            .search(&ArtworkQuery::default().paged(Pagination::new(1, Some(1))))
            .await
            .unwrap();
        assert_eq!(titles(page), vec!["alpha"]);

        assert_eq!(repo.count(&ArtworkFilter::default()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_generated_ids_sort_numerically() {
        let repo = repo().await;
        for id in ["A10000", "P-7", "A0002", "A9999"] {
            repo.insert(&artwork(id, id)).await.unwrap();
        }

        let ids = |items: Vec<Artwork>| {
            items
                .into_iter()
                .map(|a| a.id.to_string())
                .collect::<Vec<_>>()
        };

        let ascending = repo.search(&ArtworkQuery::default()).await.unwrap();
        assert_eq!(ids(ascending), vec!["A0002", "A9999", "A10000", "P-7"]);

        let descending = repo
            .search(&ArtworkQuery::default().sorted(ArtworkSort::IdDesc))
            .await
            .unwrap();
        assert_eq!(ids(descending), vec!["A10000", "A9999", "A0002", "P-7"]);
    }

    #[tokio::test]
    async fn test_like_wildcards_are_literal() {
        let repo = repo().await;
        let mut record = artwork("A0001", "Percent");
        record.medium = "100% cotton".into();
        repo.insert(&record).await.unwrap();
        let mut other = artwork("A0002", "Other");
        other.medium = "1000 cotton".into();
        repo.insert(&other).await.unwrap();

        let filter = ArtworkFilter {
            medium: Some("0%".into()),
            ..ArtworkFilter::default()
        };
        assert_eq!(repo.count(&filter).await.unwrap(), 1);
    }
}

//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod artwork_query;
mod row_mappers;
mod sqlite_artwork_repository;
mod sqlite_image_repository;

pub use sqlite_artwork_repository::SqliteArtworkRepository;
pub use sqlite_image_repository::SqliteImageRepository;

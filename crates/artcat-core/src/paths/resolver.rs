//! Resolved catalog locations.

use std::fmt;
use std::path::{Path, PathBuf};

use super::ensure::ensure_directory;
use super::error::PathError;
use super::platform::data_root;

/// Database file name inside the data root.
pub const DATABASE_FILE: &str = "catalog.db";

/// Media directory name inside the data root.
pub const MEDIA_DIR: &str = "media";

/// All catalog paths captured in a single struct.
///
/// Used by bootstrap code and printed by the `paths` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Root directory for catalog data.
    pub data_root: PathBuf,
    /// Path to the `SQLite` database file.
    pub database_path: PathBuf,
    /// Root of the original/thumbnail file tree.
    pub media_root: PathBuf,
}

impl ResolvedPaths {
    /// Resolve paths from an optional override, the environment, or the
    /// platform default.
    pub fn resolve(explicit_root: Option<&str>) -> Result<Self, PathError> {
        Ok(Self::under(data_root(explicit_root)?))
    }

    /// Lay out catalog paths below a given root. Pure; touches nothing.
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let data_root = root.into();
        Self {
            database_path: data_root.join(DATABASE_FILE),
            media_root: data_root.join(MEDIA_DIR),
            data_root,
        }
    }

    /// Create the data root and media root.
    pub fn ensure(&self) -> Result<(), PathError> {
        ensure_directory(&self.data_root)?;
        ensure_directory(&self.media_root)
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }
}

impl fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data root:  {}", self.data_root.display())?;
        writeln!(f, "Database:   {}", self.database_path.display())?;
        write!(f, "Media root: {}", self.media_root.display())
    }
}

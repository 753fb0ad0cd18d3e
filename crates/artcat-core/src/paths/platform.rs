//! Data root resolution.

use std::env;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable that overrides the data root.
pub const DATA_DIR_ENV: &str = "ARTCAT_DATA_DIR";

const APP_DIR_NAME: &str = "artcat";

/// Get the root directory for catalog data (database and media).
///
/// Resolution order:
/// 1. Explicit override (e.g. a `--data-dir` flag)
/// 2. `ARTCAT_DATA_DIR` environment variable
/// 3. System data directory (e.g., `~/.local/share/artcat`)
pub fn data_root(explicit: Option<&str>) -> Result<PathBuf, PathError> {
    if let Some(path) = explicit {
        return non_empty(path);
    }

    if let Ok(path) = env::var(DATA_DIR_ENV) {
        return non_empty(&path);
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    Ok(data_dir.join(APP_DIR_NAME))
}

fn non_empty(path: &str) -> Result<PathBuf, PathError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }
    Ok(PathBuf::from(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_root_wins() {
        let root = data_root(Some("/srv/catalog")).unwrap();
        assert_eq!(root, PathBuf::from("/srv/catalog"));
    }

    #[test]
    fn test_blank_explicit_root_rejected() {
        assert!(matches!(data_root(Some("  ")), Err(PathError::EmptyPath)));
    }
}

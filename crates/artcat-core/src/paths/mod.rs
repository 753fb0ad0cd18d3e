//! Path utilities for catalog data directories.
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O; adapters print what they need

mod ensure;
mod error;
mod platform;
mod resolver;

pub use ensure::{ensure_directory, verify_writable};
pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root};
pub use resolver::{DATABASE_FILE, MEDIA_DIR, ResolvedPaths};

//! Media adapters for artcat.
//!
//! - [`FsMediaStorage`]: originals and thumbnails under a media root
//! - [`ThumbnailProcessor`]: decoding, size probing and JPEG thumbnails

mod storage;
mod thumbnail;

pub use storage::{ARTWORKS_DIR, FsMediaStorage, TEMP_EXTENSION, THUMBS_DIR};
pub use thumbnail::{DEFAULT_JPEG_QUALITY, ThumbnailProcessor};

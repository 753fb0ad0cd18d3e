//! Printable document port.

use super::RenderError;
use crate::domain::Artwork;

/// Input for a one-page artwork sheet.
#[derive(Debug, Clone)]
pub struct OnePager {
    pub artwork: Artwork,
    /// Bytes of the primary image, if the artwork has one.
    pub primary_image: Option<Vec<u8>>,
}

/// Renders artwork sheets.
///
/// Rendering is deterministic: the same input produces the same bytes.
pub trait DocumentRenderer: Send + Sync {
    /// Render a PDF document.
    fn render(&self, sheet: &OnePager) -> Result<Vec<u8>, RenderError>;
}

//! Page geometry in PDF points.

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;

pub const MARGIN: f32 = 20.0 * MM;

pub const TITLE_SIZE: f32 = 18.0;
pub const SUBTITLE_SIZE: f32 = 12.0;
pub const BODY_SIZE: f32 = 11.0;
pub const FOOTER_SIZE: f32 = 9.0;

/// Square box the primary image is fitted into.
pub const IMAGE_BOX: f32 = 95.0 * MM;

/// Top of the image box.
pub const IMAGE_TOP: f32 = PAGE_HEIGHT - MARGIN - 18.0 * MM;

/// Metadata column, right of the image box.
pub const META_X: f32 = MARGIN + 105.0 * MM;
pub const META_VALUE_X: f32 = META_X + 25.0 * MM;
pub const META_ROW: f32 = 6.0 * MM;
pub const META_VALUE_CHARS: usize = 20;

/// Description block, below the image box.
pub const DESCRIPTION_TOP: f32 = IMAGE_TOP - IMAGE_BOX - 12.0 * MM;
pub const DESCRIPTION_LEADING: f32 = 5.0 * MM;
pub const DESCRIPTION_CHARS: usize = 90;
pub const DESCRIPTION_BOTTOM: f32 = 28.0 * MM;

pub const FOOTER_Y: f32 = 15.0 * MM;

/// Longest edge of the embedded image, in pixels.
pub const EMBED_MAX_EDGE: u32 = 1600;
pub const EMBED_JPEG_QUALITY: u8 = 90;

/// Scale `(width, height)` to fit a square box, keeping the aspect ratio.
#[allow(clippy::cast_precision_loss)]
pub fn fit(width: u32, height: u32, edge: f32) -> (f32, f32) {
    let (w, h) = (width as f32, height as f32);
    let scale = (edge / w).min(edge / h);
    (w * scale, h * scale)
}

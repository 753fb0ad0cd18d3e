//! One-page PDF sheets for artworks.
//!
//! The sheet uses the standard Helvetica fonts so nothing has to be
//! embedded, and carries no timestamp: the same artwork and image always
//! render to the same bytes.

mod layout;
mod onepager;
mod text;

pub use onepager::OnePagerRenderer;

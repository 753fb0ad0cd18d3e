//! Command handlers that delegate to AppCore.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call AppCore methods
//!   3. Format output for the terminal
//!
//! Handlers should NOT access repositories or the media tree directly.

pub mod export;
pub mod list;
pub mod paths;
pub mod reconcile;
pub mod show;
pub mod web;

use artcat_core::{ArtworkId, ArtworkService};

use crate::error::CliError;

/// Parse an artwork id given on the command line.
pub(crate) fn artwork_id(raw: &str) -> Result<ArtworkId, CliError> {
    ArtworkService::resolve_id(raw).map_err(CliError::from)
}

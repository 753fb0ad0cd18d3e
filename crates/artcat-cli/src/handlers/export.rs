//! Export command handler.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::artwork_id;

/// Execute the export command, writing the one-pager PDF.
///
/// Returns the path written.
pub async fn execute(ctx: &CliContext, raw_id: &str, out: Option<&Path>) -> Result<PathBuf> {
    let id = artwork_id(raw_id)?;
    let pdf = ctx
        .app()
        .catalog()
        .export_onepager(&id)
        .await
        .map_err(CliError::from)?;

    let target = out.map_or_else(
        || PathBuf::from(format!("{}_onepager.pdf", id.as_str())),
        Path::to_path_buf,
    );
    tokio::fs::write(&target, &pdf)
        .await
        .map_err(CliError::from)
        .with_context(|| format!("writing {}", target.display()))?;

    println!("Wrote {} ({} bytes)", target.display(), pdf.len());
    Ok(target)
}

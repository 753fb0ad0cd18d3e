//! Reconcile command handler.

use anyhow::Result;

use artcat_core::ReconcileReport;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the reconcile command.
pub async fn execute(ctx: &CliContext) -> Result<ReconcileReport> {
    let report = ctx
        .app()
        .images()
        .reconcile()
        .await
        .map_err(CliError::from)?;

    if report.is_clean() {
        println!("Media tree is consistent with the catalog.");
        return Ok(report);
    }

    println!("Removed {} orphaned file(s)", report.orphans_removed.len());
    for path in &report.orphans_removed {
        println!("  {path}");
    }
    println!("Removed {} temporary file(s)", report.temp_files_removed);
    println!("Removed {} empty director(ies)", report.empty_dirs_removed);

    if !report.missing.is_empty() {
        println!("{} image record(s) point at missing files:", report.missing.len());
        for missing in &report.missing {
            println!(
                "  {} ({}) {}",
                missing.image_id,
                missing.artwork_id.as_str(),
                missing.path
            );
        }
    }
    Ok(report)
}

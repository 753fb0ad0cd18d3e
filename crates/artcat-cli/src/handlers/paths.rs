//! Paths command handler.
//!
//! Displays the resolved catalog locations without creating anything.

use anyhow::Result;

use crate::bootstrap::CliConfig;

/// Execute the paths command.
pub fn execute(config: &CliConfig) -> Result<()> {
    let paths = config.resolve_paths()?;
    println!("{paths}");
    Ok(())
}

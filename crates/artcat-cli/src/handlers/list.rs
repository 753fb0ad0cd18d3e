//! List command handler.

use anyhow::Result;

use artcat_core::{ArtworkPage, ListedArtwork};

use crate::bootstrap::CliContext;
use crate::commands::ListArgs;
use crate::error::CliError;
use crate::presentation::{format_optional, print_separator, truncate_string};

const TABLE_WIDTH: usize = 92;

/// Execute the list command.
pub async fn execute(ctx: &CliContext, args: &ListArgs) -> Result<()> {
    let query = args.to_query()?;
    let page = ctx
        .app()
        .catalog()
        .search(query)
        .await
        .map_err(CliError::from)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.total == 0 {
        println!("No artworks found.");
        return Ok(());
    }
    if page.items.is_empty() {
        println!("{}", summary(0, page.total, page.offset));
        return Ok(());
    }

    print_table(&page);
    Ok(())
}

fn print_table(page: &ArtworkPage) {
    println!(
        "{:<7} {:<32} {:<6} {:<20} {:<16} {:>6}",
        "ID", "Title", "Year", "Medium", "Size (cm)", "Image"
    );
    print_separator(TABLE_WIDTH);

    for item in &page.items {
        println!("{}", row(item));
    }

    print_separator(TABLE_WIDTH);
    println!("{}", summary(page.items.len(), page.total, page.offset));
}

fn row(item: &ListedArtwork) -> String {
    let artwork = &item.artwork;
    format!(
        "{:<7} {:<32} {:<6} {:<20} {:<16} {:>6}",
        artwork.id.as_str(),
        truncate_string(&artwork.title, 32),
        format_optional(artwork.year, "-"),
        truncate_string(&artwork.medium, 20),
        truncate_string(&artwork.size_label(), 16),
        if item.primary_image.is_some() { "yes" } else { "-" },
    )
}

fn summary(shown: usize, total: u64, offset: u32) -> String {
    let shown = shown as u64;
    if offset == 0 && shown == total {
        format!("{total} artwork(s)")
    } else if shown == 0 {
        format!("No artworks past offset {offset} ({total} in total)")
    } else {
        let first = u64::from(offset) + 1;
        let last = u64::from(offset) + shown;
        format!("Showing {first}-{last} of {total} artwork(s)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        assert_eq!(summary(3, 3, 0), "3 artwork(s)");
        assert_eq!(summary(2, 12, 10), "Showing 11-12 of 12 artwork(s)");
        assert_eq!(summary(0, 12, 20), "No artworks past offset 20 (12 in total)");
    }
}

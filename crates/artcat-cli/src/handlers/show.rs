//! Show command handler.

use anyhow::Result;

use artcat_core::ArtworkDetail;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::artwork_id;
use crate::presentation::format_optional;

/// Execute the show command.
pub async fn execute(ctx: &CliContext, raw_id: &str, json: bool) -> Result<()> {
    let id = artwork_id(raw_id)?;
    let detail = ctx
        .app()
        .catalog()
        .detail(&id)
        .await
        .map_err(CliError::from)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print!("{}", render(&detail));
    }
    Ok(())
}

fn render(detail: &ArtworkDetail) -> String {
    use std::fmt::Write;

    let artwork = &detail.artwork;
    let mut out = String::new();
    let mut field = |label: &str, value: &str| {
        if !value.is_empty() {
            let _ = writeln!(out, "{label:<12} {value}");
        }
    };

    field("ID", artwork.id.as_str());
    field("Title", &artwork.title);
    field("Artist", &artwork.artist);
    field("Year", &format_optional(artwork.year, ""));
    field("Medium", &artwork.medium);
    field("Surface", &artwork.surface);
    field("Size (cm)", &artwork.size_label());
    field("Keywords", &artwork.keywords_label());
    field("Slug", &artwork.slug);
    field("Description", &artwork.description);

    let _ = writeln!(out, "\nImages: {}", detail.images.len());
    for image in &detail.images {
        let marker = if image.is_primary { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {}  {}x{} {:<4} {}",
            image.id,
            image.width,
            image.height,
            image.format,
            image.original_path
        );
    }
    out
}

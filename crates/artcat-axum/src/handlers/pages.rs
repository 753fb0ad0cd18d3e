//! HTML catalog pages.
//!
//! Mutating pages answer with a 303 redirect to the page that shows the
//! result. Failures render the inline error page with the mapped status.
//! Uploads that fail individually are listed on the detail page instead.

use std::collections::HashMap;

use askama::Template;
use axum::Form;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use artcat_core::{
    Artwork, ArtworkDetail, ArtworkId, ArtworkPage, Image, ImageUpload, Pagination, UploadOutcome,
};

use super::{artwork_id, image_id};
use crate::dto::{ArtworkForm, ListParams};
use crate::error::{HttpError, PageError};
use crate::state::AppState;

type PageResult<T> = Result<T, PageError>;

fn render(template: &impl Template) -> PageResult<Html<String>> {
    Ok(Html(template.render().map_err(HttpError::from)?))
}

fn media_url(relative: &str) -> String {
    format!("/media/{relative}")
}

fn detail_url(id: &impl std::fmt::Display) -> String {
    format!("/artworks/{id}")
}

// ─────────────────────────────────────────────────────────────────────────────
// View models
// ─────────────────────────────────────────────────────────────────────────────

struct Card {
    id: String,
    title: String,
    year: String,
    medium: String,
    size: String,
    thumb_url: Option<String>,
}

impl Card {
    fn new(artwork: &Artwork, primary: Option<&Image>) -> Self {
        Self {
            id: artwork.id.to_string(),
            title: artwork.title.clone(),
            year: year_label(artwork),
            medium: artwork.medium.clone(),
            size: artwork.size_label(),
            thumb_url: primary.map(|i| media_url(&i.thumb_path)),
        }
    }
}

struct ImageView {
    id: String,
    thumb_url: String,
    original_url: String,
    label: String,
    is_primary: bool,
}

impl From<&Image> for ImageView {
    fn from(image: &Image) -> Self {
        Self {
            id: image.id.to_string(),
            thumb_url: media_url(&image.thumb_path),
            original_url: media_url(&image.original_path),
            label: format!(
                "{} · {}×{} {}",
                image.file_name.as_deref().unwrap_or("image"),
                image.width,
                image.height,
                image.format
            ),
            is_primary: image.is_primary,
        }
    }
}

fn year_label(artwork: &Artwork) -> String {
    artwork.year.map(|y| y.to_string()).unwrap_or_default()
}

/// Current search criteria echoed back into the search form.
#[derive(Default)]
struct SearchForm {
    q: String,
    artist: String,
    medium: String,
    year_min: String,
    year_max: String,
    width_min: String,
    width_max: String,
    sort: String,
}

impl From<&ListParams> for SearchForm {
    fn from(params: &ListParams) -> Self {
        let text = |v: Option<&String>| v.map(|s| s.trim().to_string()).unwrap_or_default();
        Self {
            q: text(params.q.as_ref()),
            artist: text(params.artist.as_ref()),
            medium: text(params.medium.as_ref().or(params.style.as_ref())),
            year_min: text(params.year_min.as_ref().or(params.year_from.as_ref())),
            year_max: text(params.year_max.as_ref().or(params.year_to.as_ref())),
            width_min: text(params.width_min.as_ref()),
            width_max: text(params.width_max.as_ref()),
            sort: text(params.sort.as_ref()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Templates
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "list.html")]
struct ListPage {
    artist: String,
    search: SearchForm,
    cards: Vec<Card>,
    total: u64,
    first: u64,
    last: u64,
    prev_url: Option<String>,
    next_url: Option<String>,
}

impl ListPage {
    fn new(artist: &str, params: &ListParams, page: &ArtworkPage) -> Self {
        let shown = page.items.len() as u64;
        let offset = page.offset;
        let limit = page.limit.unwrap_or(u32::MAX);

        let prev_url = (offset > 0)
            .then(|| format!("/?{}", params.with_offset(offset.saturating_sub(limit))));
        let next_url = (u64::from(offset) + shown < page.total)
            .then(|| format!("/?{}", params.with_offset(offset.saturating_add(limit))));

        Self {
            artist: artist.to_string(),
            search: SearchForm::from(params),
            cards: page
                .items
                .iter()
                .map(|item| Card::new(&item.artwork, item.primary_image.as_ref()))
                .collect(),
            total: page.total,
            first: if shown == 0 { 0 } else { u64::from(offset) + 1 },
            last: u64::from(offset) + shown,
            prev_url,
            next_url,
        }
    }
}

#[derive(Template)]
#[template(path = "new.html")]
struct NewPage {
    artist: String,
    form: ArtworkForm,
}

#[derive(Template)]
#[template(path = "show.html")]
struct ShowPage {
    artist: String,
    id: String,
    title: String,
    year: String,
    medium: String,
    surface: String,
    size: String,
    description: String,
    keywords: String,
    slug: String,
    created_at: String,
    primary: Option<ImageView>,
    images: Vec<ImageView>,
    upload_errors: Vec<String>,
}

impl ShowPage {
    fn new(detail: &ArtworkDetail) -> Self {
        let artwork = &detail.artwork;
        Self {
            artist: artwork.artist.clone(),
            id: artwork.id.to_string(),
            title: artwork.title.clone(),
            year: year_label(artwork),
            medium: artwork.medium.clone(),
            surface: artwork.surface.clone(),
            size: artwork.size_label(),
            description: artwork.description.clone(),
            keywords: artwork.keywords_label(),
            slug: artwork.slug.clone(),
            created_at: artwork.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            primary: detail.primary().map(ImageView::from),
            images: detail.images.iter().map(ImageView::from).collect(),
            upload_errors: Vec::new(),
        }
    }

    #[must_use]
    fn with_upload_errors(mut self, outcomes: &[UploadOutcome]) -> Self {
        self.upload_errors = upload_errors(outcomes);
        self
    }
}

/// One line per rejected upload, naming the file.
fn upload_errors(outcomes: &[UploadOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter_map(|outcome| {
            let error = outcome.error.as_deref()?;
            let name = outcome
                .file_name
                .clone()
                .unwrap_or_else(|| format!("file {}", outcome.index + 1));
            Some(format!("{name}: {error}"))
        })
        .collect()
}

#[derive(Template)]
#[template(path = "edit.html")]
struct EditPage {
    artist: String,
    form: ArtworkForm,
}

// ─────────────────────────────────────────────────────────────────────────────
// Multipart
// ─────────────────────────────────────────────────────────────────────────────

/// Split a multipart body into text fields and file uploads.
///
/// A file input left empty by the browser arrives as a part with no file
/// name and no bytes; it is skipped.
async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(HashMap<String, String>, Vec<ImageUpload>), HttpError> {
    let bad = |e: axum::extract::multipart::MultipartError| HttpError::BadRequest(e.to_string());

    let mut fields = HashMap::new();
    let mut uploads = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(bad)? {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.map_err(bad)?;
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                uploads.push(ImageUpload::new(bytes.to_vec()).named(file_name));
            }
            None => {
                fields.insert(name, field.text().await.map_err(bad)?);
            }
        }
    }
    Ok((fields, uploads))
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Catalog list with the search form.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> PageResult<Html<String>> {
    let mut query = params.to_query()?;
    if query.page.limit.is_none() {
        let size = state.core.settings().effective_default_page_size();
        query.page = Pagination::new(query.page.offset, Some(size));
    }
    let page = state.core.catalog().search(query).await?;
    render(&ListPage::new(
        state.core.artworks().artist(),
        &params,
        &page,
    ))
}

/// Empty creation form.
pub async fn new_form(State(state): State<AppState>) -> PageResult<Html<String>> {
    render(&NewPage {
        artist: state.core.artworks().artist().to_string(),
        form: ArtworkForm::default(),
    })
}

/// Create from the multipart form, with an optional image.
///
/// The artwork is kept when an image is rejected; the detail page then
/// lists what went wrong.
pub async fn create(State(state): State<AppState>, multipart: Multipart) -> PageResult<Response> {
    let (mut fields, uploads) = read_multipart(multipart).await?;
    let new = ArtworkForm::from_fields(&mut fields).to_new_artwork()?;

    let created = state.core.catalog().create_with_images(&new, uploads).await?;
    let id = &created.artwork.id;
    after_uploads(&state, id, &created.uploads, StatusCode::OK, &detail_url(id)).await
}

/// Redirect to `next` when every upload was stored, otherwise render the
/// detail page with one error per rejected file.
async fn after_uploads(
    state: &AppState,
    id: &ArtworkId,
    outcomes: &[UploadOutcome],
    failure_status: StatusCode,
    next: &str,
) -> PageResult<Response> {
    if outcomes.iter().all(UploadOutcome::is_ok) {
        return Ok(Redirect::to(next).into_response());
    }
    let detail = state.core.catalog().detail(id).await?;
    let page = ShowPage::new(&detail).with_upload_errors(outcomes);
    Ok((failure_status, render(&page)?).into_response())
}

/// Artwork detail with its gallery.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> PageResult<Html<String>> {
    let id = artwork_id(&id)?;
    let detail = state.core.catalog().detail(&id).await?;
    render(&ShowPage::new(&detail))
}

/// Edit form prefilled with the stored values.
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PageResult<Html<String>> {
    let id = artwork_id(&id)?;
    let artwork = state.core.artworks().get(&id).await?;
    render(&EditPage {
        artist: artwork.artist.clone(),
        form: ArtworkForm::from_artwork(&artwork),
    })
}

/// Apply the edit form.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ArtworkForm>,
) -> PageResult<Redirect> {
    let id = artwork_id(&id)?;
    let update = form.to_update()?;
    state.core.artworks().update(&id, &update).await?;
    Ok(Redirect::to(&detail_url(&id)))
}

/// Delete an artwork and go back to the list.
pub async fn delete_artwork(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PageResult<Redirect> {
    let id = artwork_id(&id)?;
    state.core.catalog().delete_artwork(&id).await?;
    Ok(Redirect::to("/"))
}

/// Upload one or more images from the detail or list page.
///
/// A `view=list` field sends the browser back to the list when every file
/// was stored. Rejected files are listed on the detail page, with status
/// 422 when none was stored.
pub async fn upload_images(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> PageResult<Response> {
    let id = artwork_id(&id)?;
    let (fields, uploads) = read_multipart(multipart).await?;
    if uploads.is_empty() {
        return Err(HttpError::BadRequest("choose at least one image file".into()).into());
    }

    let results = state.core.catalog().attach_images(&id, uploads).await?;
    let failure_status = if results.iter().any(UploadOutcome::is_ok) {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    let next = if fields.get("view").is_some_and(|v| v == "list") {
        "/".to_string()
    } else {
        detail_url(&id)
    };
    after_uploads(&state, &id, &results, failure_status, &next).await
}

/// Make an image of this artwork primary.
pub async fn set_primary(
    State(state): State<AppState>,
    Path((id, image)): Path<(String, String)>,
) -> PageResult<Redirect> {
    let id = artwork_id(&id)?;
    let image = image_id(&image)?;
    state.core.catalog().set_primary(Some(&id), image).await?;
    Ok(Redirect::to(&detail_url(&id)))
}

/// Delete an image of this artwork.
pub async fn delete_image(
    State(state): State<AppState>,
    Path((id, image)): Path<(String, String)>,
) -> PageResult<Redirect> {
    let id = artwork_id(&id)?;
    let image = image_id(&image)?;
    state.core.catalog().delete_image(Some(&id), image).await?;
    Ok(Redirect::to(&detail_url(&id)))
}

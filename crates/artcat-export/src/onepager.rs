//! A4 artwork sheet rendered with `lopdf`.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};
use tracing::debug;

use artcat_core::{DocumentRenderer, OnePager, RenderError};

use crate::layout::{
    BODY_SIZE, DESCRIPTION_BOTTOM, DESCRIPTION_CHARS, DESCRIPTION_LEADING, DESCRIPTION_TOP,
    EMBED_JPEG_QUALITY, EMBED_MAX_EDGE, FOOTER_SIZE, FOOTER_Y, IMAGE_BOX, IMAGE_TOP, MARGIN, MM,
    META_ROW, META_VALUE_CHARS, META_VALUE_X, META_X, PAGE_HEIGHT, PAGE_WIDTH, SUBTITLE_SIZE,
    TITLE_SIZE, fit,
};
use crate::text::{to_win_ansi, truncate, wrap};

const REGULAR: &str = "F1";
const BOLD: &str = "F2";
const IMAGE: &str = "Im0";

/// Renders the one-page sheet of an artwork.
#[derive(Debug, Default, Clone, Copy)]
pub struct OnePagerRenderer;

impl OnePagerRenderer {
    pub const fn new() -> Self {
        Self
    }
}

struct EmbeddedImage {
    jpeg: Vec<u8>,
    width: u32,
    height: u32,
}

/// Decode any supported format and re-encode as baseline RGB JPEG, which
/// PDF viewers display natively through `DCTDecode`.
fn prepare_image(bytes: &[u8]) -> Result<EmbeddedImage, RenderError> {
    let img = image::load_from_memory(bytes).map_err(|e| RenderError::Image(e.to_string()))?;
    let (width, height) = img.dimensions();
    let img = if width > EMBED_MAX_EDGE || height > EMBED_MAX_EDGE {
        img.resize(EMBED_MAX_EDGE, EMBED_MAX_EDGE, FilterType::Lanczos3)
    } else {
        img
    };

    let rgb = img.to_rgb8();
    let mut jpeg = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, EMBED_JPEG_QUALITY))
        .map_err(|e| RenderError::Image(e.to_string()))?;

    Ok(EmbeddedImage {
        width: rgb.width(),
        height: rgb.height(),
        jpeg,
    })
}

fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

/// Accumulates content-stream operations.
#[derive(Default)]
struct Canvas {
    ops: Vec<Operation>,
}

impl Canvas {
    fn text(&mut self, font: &str, size: f32, x: f32, y: f32, text: &str) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops
            .push(Operation::new("Tf", vec![name(font), Object::Real(size)]));
        self.ops
            .push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn image(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "cm",
            vec![
                Object::Real(width),
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(height),
                Object::Real(x),
                Object::Real(y),
            ],
        ));
        self.ops.push(Operation::new("Do", vec![name(IMAGE)]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    fn encode(self) -> Result<Vec<u8>, RenderError> {
        Content {
            operations: self.ops,
        }
        .encode()
        .map_err(|e| RenderError::Document(e.to_string()))
    }
}

fn draw_sheet(canvas: &mut Canvas, sheet: &OnePager, image: Option<&EmbeddedImage>) {
    let artwork = &sheet.artwork;

    let mut y = PAGE_HEIGHT - MARGIN;
    canvas.text(BOLD, TITLE_SIZE, MARGIN, y, &truncate(&artwork.title, 55));
    y -= 8.0 * MM;
    let subtitle = match artwork.year {
        Some(year) => format!("{} · {year}", artwork.artist),
        None => artwork.artist.clone(),
    };
    canvas.text(REGULAR, SUBTITLE_SIZE, MARGIN, y, &truncate(&subtitle, 80));

    if let Some(image) = image {
        let (w, h) = fit(image.width, image.height, IMAGE_BOX);
        canvas.image(MARGIN, IMAGE_TOP - h, w, h);
    }

    let year = artwork.year.map(|y| y.to_string()).unwrap_or_default();
    let size = artwork.size_label();
    let keywords = artwork.keywords_label();
    let rows = [
        ("Year", year.as_str()),
        ("Medium", artwork.medium.as_str()),
        ("Surface", artwork.surface.as_str()),
        ("Size (cm)", size.as_str()),
        ("Keywords", keywords.as_str()),
    ];
    let mut row_y = IMAGE_TOP - BODY_SIZE;
    for (label, value) in rows {
        canvas.text(BOLD, BODY_SIZE, META_X, row_y, &format!("{label}:"));
        canvas.text(
            REGULAR,
            BODY_SIZE,
            META_VALUE_X,
            row_y,
            &truncate(value, META_VALUE_CHARS),
        );
        row_y -= META_ROW;
    }

    if !artwork.description.is_empty() {
        canvas.text(BOLD, SUBTITLE_SIZE, MARGIN, DESCRIPTION_TOP, "Description");
        let mut line_y = DESCRIPTION_TOP - 7.0 * MM;
        let lines = wrap(&artwork.description, DESCRIPTION_CHARS);
        let mut lines = lines.iter().peekable();
        while let Some(line) = lines.next() {
            let last_fitting = line_y - DESCRIPTION_LEADING < DESCRIPTION_BOTTOM;
            if last_fitting && lines.peek().is_some() {
                let cut = truncate(&format!("{line} …"), DESCRIPTION_CHARS);
                canvas.text(REGULAR, BODY_SIZE, MARGIN, line_y, &cut);
                break;
            }
            canvas.text(REGULAR, BODY_SIZE, MARGIN, line_y, line);
            line_y -= DESCRIPTION_LEADING;
        }
    }

    let footer = format!("{} · {}", artwork.id, artwork.slug);
    canvas.text(REGULAR, FOOTER_SIZE, MARGIN, FOOTER_Y, &footer);
}

impl DocumentRenderer for OnePagerRenderer {
    fn render(&self, sheet: &OnePager) -> Result<Vec<u8>, RenderError> {
        let image = sheet
            .primary_image
            .as_deref()
            .map(prepare_image)
            .transpose()?;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_regular = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let font_bold = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });

        let mut resources = dictionary! {
            "Font" => dictionary! {
                REGULAR => font_regular,
                BOLD => font_bold,
            },
        };
        if let Some(ref image) = image {
            let xobject = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => i64::from(image.width),
                    "Height" => i64::from(image.height),
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => Object::Integer(8),
                    "Filter" => "DCTDecode",
                },
                image.jpeg.clone(),
            )
            .with_compression(false);
            let image_id = doc.add_object(xobject);
            resources.set("XObject", dictionary! { IMAGE => image_id });
        }
        let resources_id = doc.add_object(resources);

        let mut canvas = Canvas::default();
        draw_sheet(&mut canvas, sheet, image.as_ref());
        let content_id = doc.add_object(Stream::new(dictionary! {}, canvas.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => Object::Integer(1),
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut out = Vec::new();
        doc.save_to(&mut out)
            .map_err(|e| RenderError::Document(e.to_string()))?;

        debug!(
            target: "artcat.export",
            id = %sheet.artwork.id,
            bytes = out.len(),
            with_image = image.is_some(),
            "Rendered one-pager"
        );
        Ok(out)
    }
}

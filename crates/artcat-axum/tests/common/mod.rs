//! Shared helpers for artcat-axum router tests.
//!
//! Each test gets its own data directory, so tests never share a database
//! or a media tree.

#![allow(dead_code)]

use std::io::Cursor;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use tempfile::TempDir;
use tower::ServiceExt;

use artcat_axum::bootstrap::{CorsConfig, ServerConfig, bootstrap};
use artcat_axum::routes::create_router;
use artcat_core::CatalogSettings;

/// Artist configured for every test server.
pub const TEST_ARTIST: &str = "Test Artist";

/// Boundary used by [`multipart`].
pub const BOUNDARY: &str = "artcat-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub data_dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "expected JSON, got {e}: {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

/// Build a router over a fresh data directory.
pub async fn app_with(api_key: Option<&str>) -> TestApp {
    let data_dir = tempfile::tempdir().unwrap();
    let settings = CatalogSettings {
        artist_name: Some(TEST_ARTIST.to_string()),
        api_key: api_key.map(str::to_string),
        ..CatalogSettings::with_defaults()
    };
    let config = ServerConfig {
        settings,
        ..ServerConfig::with_defaults().with_data_dir(data_dir.path())
    };

    let ctx = bootstrap(&config).await.expect("bootstrap");
    TestApp {
        router: create_router(ctx, &CorsConfig::AllowAll),
        data_dir,
    }
}

pub async fn app() -> TestApp {
    app_with(None).await
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_empty(&self, uri: &str) -> TestResponse {
        self.send(Request::post(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: &serde_json::Value) -> TestResponse {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> TestResponse {
        self.send_json("POST", uri, body).await
    }

    pub async fn post_multipart(&self, uri: &str, body: Vec<u8>) -> TestResponse {
        self.send(
            Request::post(uri)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Create an artwork through the API and return its id.
    pub async fn create_artwork(&self, body: serde_json::Value) -> String {
        let response = self.post_json("/api/artworks", &body).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        response.json()["artwork"]["id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    pub fn media_file(&self, relative: &str) -> std::path::PathBuf {
        self.data_dir.path().join("media").join(relative)
    }
}

/// A solid-colour PNG.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb([30u8, 90, 160]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// One part of a multipart body: `(name, file_name, bytes)`.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

/// Encode a `multipart/form-data` body with [`BOUNDARY`].
pub fn multipart(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

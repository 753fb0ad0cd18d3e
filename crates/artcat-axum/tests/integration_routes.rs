//! Integration tests for the Axum web server.
//!
//! These tests drive the full router against a real database and media
//! tree in a temporary directory.

mod common;

use axum::http::{StatusCode, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;

use common::{TEST_ARTIST, app, multipart, png};

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let app = app().await;
    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.body[..], b"OK");
}

#[tokio::test]
async fn ids_are_sequential_and_never_reused() {
    let app = app().await;

    assert_eq!(app.create_artwork(json!({"title": "First"})).await, "A0001");
    assert_eq!(app.create_artwork(json!({"title": "Second"})).await, "A0002");

    let response = app.delete("/api/artworks/A0001").await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get("/api/artworks/A0001").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.delete("/api/artworks/A0001").await.status, StatusCode::NOT_FOUND);

    assert_eq!(app.create_artwork(json!({"title": "Third"})).await, "A0003");
}

#[tokio::test]
async fn create_returns_artwork_with_configured_artist() {
    let app = app().await;
    let response = app
        .post_json(
            "/api/artworks",
            &json!({
                "title": "  Harbour at Dusk ",
                "year": 2004,
                "medium": "Oil",
                "width_cm": 60,
                "height_cm": 40.5,
                "keywords": ["sea", " boats ", "sea", ""]
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let body = response.json();
    let artwork = &body["artwork"];
    assert_eq!(artwork["title"], "Harbour at Dusk");
    assert_eq!(artwork["artist"], TEST_ARTIST);
    assert_eq!(artwork["slug"], "harbour-at-dusk-test-artist");
    assert_eq!(artwork["keywords"], json!(["boats", "sea"]));
    assert_eq!(body["uploads"], json!([]));
}

#[tokio::test]
async fn duplicate_supplied_id_is_conflict() {
    let app = app().await;
    app.create_artwork(json!({"id": "B-7", "title": "One"})).await;

    let response = app
        .post_json("/api/artworks", &json!({"id": "B-7", "title": "Two"}))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.json()["status"], 409);
}

#[tokio::test]
async fn invalid_bodies_are_bad_requests() {
    let app = app().await;

    let blank = app.post_json("/api/artworks", &json!({"title": "   "})).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let bad_id = app
        .post_json("/api/artworks", &json!({"id": "../etc", "title": "x"}))
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);

    let wrong_type = app
        .post_json("/api/artworks", &json!({"title": "x", "year": "last spring"}))
        .await;
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);

    let not_json = app
        .send(
            axum::http::Request::post("/api/artworks")
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from("{title:"))
                .unwrap(),
        )
        .await;
    assert_eq!(not_json.status, StatusCode::BAD_REQUEST);

    let bad_sort = app.get("/api/artworks?sort=colour").await;
    assert_eq!(bad_sort.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_updates_fields_and_clears_nulls() {
    let app = app().await;
    let id = app
        .create_artwork(json!({"title": "Draft", "year": 1999, "medium": "Ink"}))
        .await;

    let response = app
        .send_json(
            "PATCH",
            &format!("/api/artworks/{id}"),
            &json!({"title": "Final", "year": null}),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let artwork = response.json();
    assert_eq!(artwork["title"], "Final");
    assert_eq!(artwork["year"], serde_json::Value::Null);
    assert_eq!(artwork["medium"], "Ink");
    assert_eq!(artwork["slug"], "final-test-artist");

    let missing = app
        .send_json("PATCH", "/api/artworks/A0999", &json!({"title": "x"}))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_filters_sorts_and_pages() {
    let app = app().await;
    app.create_artwork(json!({"title": "Blue Harbour", "year": 1990, "medium": "Oil on canvas", "width_cm": 50}))
        .await;
    app.create_artwork(json!({"title": "Red Field", "year": 2005, "medium": "Acrylic", "width_cm": 120}))
        .await;
    app.create_artwork(json!({"title": "Untitled", "medium": "oil", "keywords": ["harbour"]}))
        .await;

    let ids = |body: serde_json::Value| -> Vec<String> {
        body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["id"].as_str().unwrap().to_string())
            .collect()
    };

    let all = app.get("/api/artworks").await.json();
    assert_eq!(all["total"], 3);
    assert_eq!(ids(all), ["A0001", "A0002", "A0003"]);

    let text = app.get("/api/artworks?q=HARBOUR").await.json();
    assert_eq!(ids(text), ["A0001", "A0003"]);

    let style = app.get("/api/artworks?style=OIL").await.json();
    assert_eq!(ids(style), ["A0001", "A0003"]);

    let years = app.get("/api/artworks?year_from=1990&year_to=2000").await.json();
    assert_eq!(ids(years), ["A0001"]);

    let widths = app.get("/api/artworks?width_min=50&width_max=120").await.json();
    assert_eq!(ids(widths), ["A0001", "A0002"]);

    let inverted = app.get("/api/artworks?year_min=2010&year_max=2000").await.json();
    assert_eq!(inverted["total"], 0);
    assert!(ids(inverted).is_empty());

    let newest = app.get("/api/artworks?sort=-year").await.json();
    assert_eq!(ids(newest), ["A0002", "A0001", "A0003"]);

    let paged = app.get("/api/artworks?offset=1&limit=1").await.json();
    assert_eq!(paged["total"], 3);
    assert_eq!(paged["limit"], 1);
    assert_eq!(ids(paged), ["A0002"]);
}

#[tokio::test]
async fn json_image_upload_stores_files() {
    let app = app().await;
    let id = app.create_artwork(json!({"title": "Gallery"})).await;

    let response = app
        .post_json(
            &format!("/api/artworks/{id}/images-json"),
            &json!({"images": [
                {"data": STANDARD.encode(png(800, 400)), "file_name": "wide.png"},
                {"data": STANDARD.encode(b"not an image"), "file_name": "notes.txt"}
            ]}),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text());
    let report = response.json();
    assert_eq!(report["stored"], 1);
    assert_eq!(report["failed"], 1);
    assert_eq!(report["results"][1]["index"], 1);
    assert!(report["results"][1]["error"].is_string());

    let detail = app.get(&format!("/api/artworks/{id}")).await.json();
    let image = &detail["images"][0];
    assert_eq!(image["is_primary"], true);
    assert_eq!(image["width"], 800);
    assert_eq!(detail["primary_image_id"], image["id"]);

    let thumb_path = image["thumb_path"].as_str().unwrap();
    assert!(app.media_file(thumb_path).is_file());
    let served = app.get(&format!("/media/{thumb_path}")).await;
    assert_eq!(served.status, StatusCode::OK);
    assert!(!served.body.is_empty());

    let listed = app.get("/api/artworks").await.json();
    assert_eq!(listed["items"][0]["primary_image"]["id"], image["id"]);
}

#[tokio::test]
async fn json_image_upload_errors() {
    let app = app().await;
    let id = app.create_artwork(json!({"title": "Gallery"})).await;

    let all_bad = app
        .post_json(
            &format!("/api/artworks/{id}/images-json"),
            &json!({"images": [{"data": STANDARD.encode(b"garbage")}]}),
        )
        .await;
    assert_eq!(all_bad.status, StatusCode::UNPROCESSABLE_ENTITY);

    let missing = app
        .post_json(
            "/api/artworks/A0404/images-json",
            &json!({"images": [{"data": STANDARD.encode(png(8, 8))}]}),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let bad_base64 = app
        .post_json(
            &format!("/api/artworks/{id}/images-json"),
            &json!({"images": [{"data": "%%%"}]}),
        )
        .await;
    assert_eq!(bad_base64.status, StatusCode::BAD_REQUEST);

    // Nothing was written for the rejected uploads.
    let detail = app.get(&format!("/api/artworks/{id}")).await.json();
    assert_eq!(detail["images"], json!([]));
}

#[tokio::test]
async fn image_api_promotes_and_deletes() {
    let app = app().await;
    let id = app
        .create_artwork(json!({
            "title": "Pair",
            "images": [
                {"data": STANDARD.encode(png(10, 10)), "file_name": "a.png"},
                {"data": STANDARD.encode(png(20, 20)), "file_name": "b.png"}
            ]
        }))
        .await;

    let detail = app.get(&format!("/api/artworks/{id}")).await.json();
    let first = detail["images"][0]["id"].as_str().unwrap().to_string();
    let second = detail["images"][1]["id"].as_str().unwrap().to_string();
    assert_eq!(detail["primary_image_id"], first.as_str());

    let promoted = app.post_empty(&format!("/api/images/{second}/primary")).await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.json()["is_primary"], true);

    let deleted = app.delete(&format!("/api/images/{second}")).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json()["promoted"], first.as_str());

    let detail = app.get(&format!("/api/artworks/{id}")).await.json();
    assert_eq!(detail["primary_image_id"], first.as_str());

    assert_eq!(
        app.delete(&format!("/api/images/{second}")).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.post_empty("/api/images/not-a-uuid/primary").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn delete_artwork_removes_media_directory() {
    let app = app().await;
    let id = app
        .create_artwork(json!({
            "title": "Doomed",
            "images": [{"data": STANDARD.encode(png(16, 16))}]
        }))
        .await;
    let artwork_dir = app.media_file(&format!("artworks/{id}"));
    assert!(artwork_dir.is_dir());

    assert_eq!(
        app.delete(&format!("/api/artworks/{id}")).await.status,
        StatusCode::NO_CONTENT
    );
    assert!(!artwork_dir.exists());
}

#[tokio::test]
async fn onepager_pdf_export() {
    let app = app().await;
    let id = app
        .create_artwork(json!({
            "title": "Printed",
            "year": 2012,
            "description": "A sheet for the archive.",
            "images": [{"data": STANDARD.encode(png(300, 200))}]
        }))
        .await;

    let response = app.get(&format!("/artworks/{id}/onepager.pdf")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_TYPE], "application/pdf");
    assert!(response.body.starts_with(b"%PDF"));

    let again = app.get(&format!("/artworks/{id}/onepager.pdf")).await;
    assert_eq!(response.body, again.body);

    let text_only = app.create_artwork(json!({"title": "No picture"})).await;
    let response = app.get(&format!("/artworks/{text_only}/onepager.pdf")).await;
    assert_eq!(response.status, StatusCode::OK);

    let missing = app.get("/artworks/A0999/onepager.pdf").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert!(missing.text().contains("404"));
}

#[tokio::test]
async fn html_create_flow_redirects_to_detail() {
    let app = app().await;
    let image = png(64, 48);
    let body = multipart(&[
        ("artwork_id", None, b""),
        ("title", None, b"Window Light"),
        ("year", None, b"2021"),
        ("medium", None, b"Gouache"),
        ("keywords", None, b"interior, light"),
        ("image", Some("window.png"), &image),
    ]);

    let response = app.post_multipart("/artworks", body).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/artworks/A0001");

    let page = app.get("/artworks/A0001").await;
    assert_eq!(page.status, StatusCode::OK);
    let html = page.text();
    assert!(html.contains("Window Light"));
    assert!(html.contains("Gouache"));
    assert!(html.contains("(primary)"));

    let list = app.get("/?q=window").await;
    assert_eq!(list.status, StatusCode::OK);
    assert!(list.text().contains("Window Light"));
}

#[tokio::test]
async fn html_create_without_image_and_empty_file_input() {
    let app = app().await;
    let body = multipart(&[("title", None, b"Sketch"), ("image", Some(""), b"")]);

    let response = app.post_multipart("/artworks", body).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let detail = app.get("/api/artworks/A0001").await.json();
    assert_eq!(detail["images"], json!([]));
}

#[tokio::test]
async fn html_create_lists_rejected_images() {
    let app = app().await;
    let image = png(32, 32);
    let body = multipart(&[
        ("title", None, b"Mixed Batch"),
        ("image", Some("good.png"), &image),
        ("image", Some("notes.txt"), b"not an image"),
    ]);

    let response = app.post_multipart("/artworks", body).await;
    assert_eq!(response.status, StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Mixed Batch"));
    assert!(html.contains("Some images were not stored"));
    assert!(html.contains("notes.txt: Invalid image"));
    assert!(!html.contains("good.png: "));

    let detail = app.get("/api/artworks/A0001").await.json();
    assert_eq!(detail["images"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn html_upload_lists_rejected_images() {
    let app = app().await;
    let id = app.create_artwork(json!({"title": "Target"})).await;

    let body = multipart(&[
        ("view", None, b"list"),
        ("files", Some("ok.png"), &png(10, 10)),
        ("files", Some("broken.png"), b"\x89PNG truncated"),
    ]);
    let response = app
        .post_multipart(&format!("/artworks/{id}/images"), body)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains("broken.png: Invalid image"));

    let body = multipart(&[("view", None, b"list"), ("files", Some("ok.png"), &png(10, 10))]);
    let response = app
        .post_multipart(&format!("/artworks/{id}/images"), body)
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/");
}

#[tokio::test]
async fn html_list_applies_default_page_size() {
    let app = app().await;
    for i in 0..52 {
        app.create_artwork(json!({"title": format!("Plate {i}")})).await;
    }

    let html = app.get("/").await.text();
    assert!(html.contains("/artworks/A0050"));
    assert!(!html.contains("/artworks/A0051"));
    assert!(html.contains("offset=50"));

    let all = app.get("/api/artworks").await.json();
    assert_eq!(all["items"].as_array().unwrap().len(), 52);
}

#[tokio::test]
async fn html_edit_and_delete_flow() {
    let app = app().await;
    let id = app
        .create_artwork(json!({"title": "Old", "year": 2000, "width_cm": 10}))
        .await;

    let form = app.get(&format!("/artworks/{id}/edit")).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.text().contains("value=\"Old\""));

    let response = app
        .post_form(
            &format!("/artworks/{id}/edit"),
            "title=New+Title&year=&medium=Pastel&width_cm=12.5&keywords=a%2C+b",
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), format!("/artworks/{id}"));

    let artwork = app.get(&format!("/api/artworks/{id}")).await.json();
    assert_eq!(artwork["title"], "New Title");
    assert_eq!(artwork["year"], serde_json::Value::Null);
    assert_eq!(artwork["width_cm"], 12.5);
    assert_eq!(artwork["keywords"], json!(["a", "b"]));

    let bad = app
        .post_form(&format!("/artworks/{id}/edit"), "title=")
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert!(bad.text().contains("400"));

    let response = app.post_empty(&format!("/artworks/{id}/delete")).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/");
    assert_eq!(app.get(&format!("/artworks/{id}")).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn html_image_actions_check_ownership() {
    let app = app().await;
    let owner = app
        .create_artwork(json!({"title": "Owner", "images": [{"data": STANDARD.encode(png(8, 8))}]}))
        .await;
    let other = app.create_artwork(json!({"title": "Other"})).await;

    let detail = app.get(&format!("/api/artworks/{owner}")).await.json();
    let image = detail["images"][0]["id"].as_str().unwrap().to_string();

    let wrong = app
        .post_empty(&format!("/artworks/{other}/images/{image}/delete"))
        .await;
    assert_eq!(wrong.status, StatusCode::NOT_FOUND);

    let upload = multipart(&[
        ("files", Some("two.png"), &png(12, 12)),
        ("files", Some("three.png"), &png(14, 14)),
    ]);
    let response = app
        .post_multipart(&format!("/artworks/{owner}/images"), upload)
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let detail = app.get(&format!("/api/artworks/{owner}")).await.json();
    assert_eq!(detail["images"].as_array().unwrap().len(), 3);
    let newest = detail["images"][2]["id"].as_str().unwrap().to_string();

    let response = app
        .post_empty(&format!("/artworks/{owner}/images/{newest}/primary"))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let response = app
        .post_empty(&format!("/artworks/{owner}/images/{image}/delete"))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let detail = app.get(&format!("/api/artworks/{owner}")).await.json();
    assert_eq!(detail["primary_image_id"], newest.as_str());
    assert_eq!(detail["images"].as_array().unwrap().len(), 2);

    let garbage = multipart(&[("files", Some("x.png"), b"not a png")]);
    let response = app
        .post_multipart(&format!("/artworks/{owner}/images"), garbage)
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("x.png: Invalid image"));
}

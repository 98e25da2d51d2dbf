use api_rest::{build_router, AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use becc_core::{CoreConfig, ListLimits, SiteService};
use becc_files::MediaStore;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const API_KEY: &str = "test-key";
const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn app(temp: &TempDir, api_key: &str) -> Router {
    let cfg = CoreConfig::new(
        temp.path().to_path_buf(),
        temp.path().join("media"),
        ListLimits::default(),
    )
    .unwrap();
    let media = MediaStore::open(cfg.media_dir()).unwrap();
    let site = SiteService::new(Arc::new(cfg));
    build_router(AppState::new(site, media, api_key))
}

fn form_body(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).unwrap()
}

fn post_form(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("x-api-key", API_KEY)
        .body(Body::from(form_body(fields)))
        .unwrap()
}

fn get_authed(uri: &str) -> Request<Body> {
    Request::get(uri)
        .header("x-api-key", API_KEY)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

const PILLAR: &[(&str, &str)] = &[
    ("title", "Water"),
    ("description", "Protecting springs."),
    ("activities_json", r#"["Spring protection","  ","Tree nurseries"]"#),
];

#[tokio::test]
async fn health_is_public() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp, API_KEY);
    let (status, body) = send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn dashboard_requires_api_key() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp, API_KEY);

    let (status, _) = send(&app, Request::get("/dashboard").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let wrong = Request::get("/dashboard/pillars")
        .header("x-api-key", "nope")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, wrong).await.0, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, get_authed("/dashboard")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projects_count"], 0);
    assert_eq!(body["total_donations"], "0.00");
}

#[tokio::test]
async fn empty_api_key_disables_dashboard() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp, "");
    let request = Request::get("/dashboard")
        .header("x-api-key", "")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, request).await.0, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn pillar_create_edit_round_trip() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp, API_KEY);

    let (status, body) = send(&app, get_authed("/dashboard/pillars/new")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["values"]["activities_json"], "[]");
    assert_eq!(body["values"]["gallery_json"], "[]");

    let (status, body) = send(&app, post_form("/dashboard/pillars", PILLAR)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Pillar added successfully!");
    let id = body["id"].as_str().unwrap().to_owned();

    let (status, body) = send(&app, get_authed(&format!("/dashboard/pillars/{id}/edit"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["values"]["activities_json"],
        r#"["Spring protection","Tree nurseries"]"#
    );

    let (_, list) = send(&app, get_authed("/dashboard/pillars")).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["title"], "Water");
}

#[tokio::test]
async fn reserved_form_characters_survive_submission() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp, API_KEY);

    let fields = [
        ("title", "Water & Sanitation"),
        ("description", "1 + 1 = 2; 100% community led"),
        ("activities_json", r#"["Wells & springs","Latrines + hand-washing","Café ☕"]"#),
    ];
    let (status, body) = send(&app, post_form("/dashboard/pillars", &fields)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_owned();

    let (_, body) = send(&app, get_authed(&format!("/dashboard/pillars/{id}/edit"))).await;
    assert_eq!(body["values"]["title"], "Water & Sanitation");
    assert_eq!(body["values"]["description"], "1 + 1 = 2; 100% community led");
    assert_eq!(
        body["values"]["activities_json"],
        r#"["Wells & springs","Latrines + hand-washing","Café ☕"]"#
    );
}

#[tokio::test]
async fn malformed_list_is_rejected_with_values_echoed() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp, API_KEY);
    let (_, body) = send(&app, post_form("/dashboard/pillars", PILLAR)).await;
    let id = body["id"].as_str().unwrap().to_owned();

    let (status, body) = send(
        &app,
        post_form(
            &format!("/dashboard/pillars/{id}"),
            &[
                ("title", "Renamed"),
                ("description", "Protecting springs."),
                ("activities_json", "not a list"),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["activities_json"].is_array());
    assert_eq!(body["values"]["title"], "Renamed");
    assert_eq!(body["values"]["activities_json"], "not a list");

    let (_, list) = send(&app, get_authed("/dashboard/pillars")).await;
    assert_eq!(list[0]["title"], "Water");
}

#[tokio::test]
async fn unknown_record_is_not_found() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp, API_KEY);

    let missing = "0".repeat(32);
    let (status, _) = send(&app, get_authed(&format!("/dashboard/projects/{missing}/edit"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, post_form("/dashboard/events/not-an-id/delete", &[])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_flash_and_removes_record() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp, API_KEY);
    let (_, body) = send(&app, post_form("/dashboard/pillars", PILLAR)).await;
    let id = body["id"].as_str().unwrap().to_owned();

    let (status, body) =
        send(&app, post_form(&format!("/dashboard/pillars/{id}/delete"), &[])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Pillar deleted successfully!");

    let (_, list) = send(&app, get_authed("/dashboard/pillars")).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn public_pages_include_pillars() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp, API_KEY);
    send(&app, post_form("/dashboard/pillars", PILLAR)).await;

    let (status, body) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["organisation"].is_null());
    assert_eq!(body["pillars"][0]["title"], "Water");
    assert_eq!(body["pillars"][0]["activities"][1], "Tree nurseries");

    let (status, body) = send(&app, Request::get("/about").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["core_values"], serde_json::json!([]));
}

#[tokio::test]
async fn contact_form_validates_without_api_key() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp, API_KEY);

    let request = |fields: &[(&str, &str)]| {
        Request::post("/contact")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form_body(fields)))
            .unwrap()
    };

    let (status, body) = send(&app, request(&[("name", "Akinyi"), ("email", "nope")])).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["message"].is_array());

    let (status, _) = send(
        &app,
        request(&[
            ("name", "Akinyi"),
            ("email", "akinyi@example.org"),
            ("message", "Hello"),
        ]),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, messages) = send(&app, get_authed("/dashboard/messages")).await;
    assert_eq!(messages[0]["name"], "Akinyi");
}

#[tokio::test]
async fn uploaded_media_is_served_back() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp, API_KEY);
    let mut png = PNG_HEADER.to_vec();
    png.extend_from_slice(b"pixels");

    let upload = Request::post("/dashboard/media?filename=spring.png")
        .header("x-api-key", API_KEY)
        .body(Body::from(png.clone()))
        .unwrap();
    let (status, body) = send(&app, upload).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["media_type"], "image/png");
    let url = body["url"].as_str().unwrap().to_owned();

    let response = app
        .clone()
        .oneshot(Request::get(url.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes.as_ref(), png.as_slice());

    let text = Request::post("/dashboard/media")
        .header("x-api-key", API_KEY)
        .body(Body::from("plain text"))
        .unwrap();
    assert_eq!(send(&app, text).await.0, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

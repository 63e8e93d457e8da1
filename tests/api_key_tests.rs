mod common;

use axum::http::{Method, StatusCode};

use common::*;
use sf_asset_api::config::SchemaVersion;

#[tokio::test]
async fn test_generated_keys_are_unique_and_usable() {
    let app = test_app(config_for(SchemaVersion::V1));

    let (status, first) = app
        .send(Method::POST, "/generate-key?owner=ops", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = app
        .send(Method::POST, "/generate-key?owner=ops", None, None)
        .await;

    let first = first["api_key"].as_str().unwrap().to_string();
    let second = second["api_key"].as_str().unwrap().to_string();
    assert_ne!(first, second);

    for key in [&first, &second] {
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(app.api_keys.owner_of(key).as_deref(), Some("ops"));

        let (status, _) = app
            .send(Method::GET, "/assets", Some(key.as_str()), None)
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_generate_requires_owner() {
    let app = test_app(config_for(SchemaVersion::V1));

    let (status, _) = app.send(Method::POST, "/generate-key", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(Method::POST, "/generate-key?owner=", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_generate_can_be_guarded() {
    let mut config = config_for(SchemaVersion::V1);
    config.keygen_requires_api_key = true;
    let app = test_app(config);

    let (status, body) = app
        .send(Method::POST, "/generate-key?owner=ops", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or missing API Key");

    let (status, body) = app
        .send(Method::POST, "/generate-key?owner=ops", Some(VALID_KEY), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["api_key"].is_string());
}

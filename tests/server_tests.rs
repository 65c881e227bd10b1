//! Integration tests for the blog list HTTP API.
//!
//! These tests use axum-test to make requests against the router without starting a real server.

#![cfg(feature = "server")]

mod common;

use axum::http::StatusCode;
use common::{TestApp, assert_error_code, assert_json_content, initial_blogs, matkailublogi};
use serde_json::{Value, json};

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check() -> anyhow::Result<()> {
    let app = TestApp::empty()?;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("ok");

    Ok(())
}

// =============================================================================
// Listing Tests
// =============================================================================

#[tokio::test]
async fn test_blogs_are_returned_as_json() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let response = app.server.get("/api/blogs").await;

    response.assert_status_ok();
    assert_json_content(&response);

    Ok(())
}

#[tokio::test]
async fn test_there_are_correct_number_of_blogs() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let blogs = app.blogs().await;
    assert_eq!(blogs.len(), initial_blogs().len());

    Ok(())
}

#[tokio::test]
async fn test_blogs_keep_insertion_order() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let titles: Vec<String> = app.blogs().await.into_iter().map(|b| b.title).collect();
    assert_eq!(titles, vec!["Ruokablogi", "Autoblogi"]);

    Ok(())
}

#[tokio::test]
async fn test_id_field_is_called_id_not_underscore_id() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let response = app.server.get("/api/blogs").await;
    let body: Value = response.json();
    let first = body.get(0).ok_or_else(|| anyhow::anyhow!("no blogs returned"))?;

    assert!(first.get("_id").is_none());
    assert!(first.get("id").and_then(Value::as_str).is_some());

    Ok(())
}

#[tokio::test]
async fn test_get_single_blog() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let blogs = app.blogs().await;
    let autoblogi = blogs.get(1).ok_or_else(|| anyhow::anyhow!("missing blog"))?;

    let response = app.server.get(&format!("/api/blogs/{}", autoblogi.id)).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["title"].as_str(), Some("Autoblogi"));
    assert_eq!(body["likes"].as_u64(), Some(1000));

    Ok(())
}

// =============================================================================
// Creation Tests
// =============================================================================

#[tokio::test]
async fn test_a_blog_can_be_added() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let created = app.create(&matkailublogi()).await;
    assert_eq!(created.title, "Matkailublogi");
    assert_eq!(created.likes, 500);

    let blogs = app.blogs().await;
    assert_eq!(blogs.len(), initial_blogs().len() + 1);
    assert!(
        blogs
            .iter()
            .any(|b| b.author.as_deref() == Some("Matti Matkustelija"))
    );

    Ok(())
}

#[tokio::test]
async fn test_likes_is_set_to_zero_if_missing() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    app.create(&json!({
        "title": "Matkailublogi",
        "author": "Matti Matkustelija",
        "url": "www.matkusteluonkivaa.fi"
    }))
    .await;

    let blogs = app.blogs().await;
    let added: Vec<_> = blogs
        .iter()
        .filter(|b| b.author.as_deref() == Some("Matti Matkustelija"))
        .collect();
    assert_eq!(blogs.len(), initial_blogs().len() + 1);
    assert_eq!(added.len(), 1);
    assert_eq!(added.first().map(|b| b.likes), Some(0));

    Ok(())
}

#[tokio::test]
async fn test_title_missing_is_bad_request() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let response = app
        .server
        .post("/api/blogs")
        .json(&json!({ "url": "www.matkusteluonkivaa.fi" }))
        .await;

    assert_error_code(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(app.blogs().await.len(), initial_blogs().len());

    Ok(())
}

#[tokio::test]
async fn test_url_missing_is_bad_request() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let response = app
        .server
        .post("/api/blogs")
        .json(&json!({ "title": "Matkailublogi", "author": "Matti Matkustelija" }))
        .await;

    assert_error_code(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    let body: Value = response.json();
    assert_eq!(body["error"]["details"]["field"].as_str(), Some("url"));

    Ok(())
}

#[tokio::test]
async fn test_title_and_url_missing_is_bad_request() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let response = app
        .server
        .post("/api/blogs")
        .json(&json!({ "author": "Matti Matkustelija", "likes": 10 }))
        .await;

    assert_error_code(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(app.blogs().await.len(), initial_blogs().len());

    Ok(())
}

#[tokio::test]
async fn test_negative_likes_is_bad_request() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let response = app
        .server
        .post("/api/blogs")
        .json(&json!({ "title": "Matkailublogi", "url": "www.x.fi", "likes": -1 }))
        .await;

    assert_error_code(&response, StatusCode::BAD_REQUEST, "INVALID_JSON");

    Ok(())
}

// =============================================================================
// Update Tests
// =============================================================================

#[tokio::test]
async fn test_likes_can_be_updated() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let blogs = app.blogs().await;
    let ruokablogi = blogs.first().ok_or_else(|| anyhow::anyhow!("missing blog"))?;

    let response = app
        .server
        .put(&format!("/api/blogs/{}", ruokablogi.id))
        .json(&json!({ "likes": 11 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["likes"].as_u64(), Some(11));
    assert_eq!(body["title"].as_str(), Some("Ruokablogi"));

    Ok(())
}

#[tokio::test]
async fn test_update_with_empty_title_is_bad_request() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let blogs = app.blogs().await;
    let ruokablogi = blogs.first().ok_or_else(|| anyhow::anyhow!("missing blog"))?;

    let response = app
        .server
        .put(&format!("/api/blogs/{}", ruokablogi.id))
        .json(&json!({ "title": "" }))
        .await;

    assert_error_code(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");

    Ok(())
}

// =============================================================================
// Deletion Tests
// =============================================================================

#[tokio::test]
async fn test_a_blog_can_be_deleted() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let blogs_at_start = app.blogs().await;
    let blog_to_delete = blogs_at_start
        .first()
        .ok_or_else(|| anyhow::anyhow!("missing blog"))?;

    let response = app
        .server
        .delete(&format!("/api/blogs/{}", blog_to_delete.id))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let blogs_at_end = app.blogs().await;
    assert!(!blogs_at_end.iter().any(|b| b.title == blog_to_delete.title));
    assert_eq!(blogs_at_end.len(), initial_blogs().len() - 1);

    Ok(())
}

#[tokio::test]
async fn test_deleting_twice_is_no_content() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let blogs = app.blogs().await;
    let blog = blogs.first().ok_or_else(|| anyhow::anyhow!("missing blog"))?;
    let path = format!("/api/blogs/{}", blog.id);

    app.server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    app.server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);

    let response = app.server.get(&path).await;
    assert_error_code(&response, StatusCode::NOT_FOUND, "BLOG_NOT_FOUND");

    Ok(())
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[tokio::test]
async fn test_unknown_id_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let response = app.server.get("/api/blogs/00000000000000ff").await;
    assert_error_code(&response, StatusCode::NOT_FOUND, "BLOG_NOT_FOUND");

    let response = app
        .server
        .put("/api/blogs/00000000000000ff")
        .json(&json!({ "likes": 1 }))
        .await;
    assert_error_code(&response, StatusCode::NOT_FOUND, "BLOG_NOT_FOUND");

    Ok(())
}

#[tokio::test]
async fn test_malformatted_id_is_bad_request() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let response = app.server.get("/api/blogs/not-an-id").await;
    assert_error_code(&response, StatusCode::BAD_REQUEST, "MALFORMATTED_ID");

    let response = app.server.delete("/api/blogs/not-an-id").await;
    assert_error_code(&response, StatusCode::BAD_REQUEST, "MALFORMATTED_ID");

    Ok(())
}

#[tokio::test]
async fn test_invalid_json_body_is_bad_request() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let response = app
        .server
        .post("/api/blogs")
        .text("{ not json")
        .content_type("application/json")
        .await;

    assert_error_code(&response, StatusCode::BAD_REQUEST, "INVALID_JSON");

    Ok(())
}

#[tokio::test]
async fn test_body_without_json_content_type_is_unsupported() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let response = app
        .server
        .post("/api/blogs")
        .text(r#"{ "title": "Matkailublogi", "url": "www.matkusteluonkivaa.fi" }"#)
        .await;

    assert_error_code(&response, StatusCode::UNSUPPORTED_MEDIA_TYPE, "INVALID_JSON");
    assert_eq!(app.blogs().await.len(), initial_blogs().len());

    Ok(())
}

// =============================================================================
// Statistics Tests
// =============================================================================

#[tokio::test]
async fn test_stats_of_initial_blogs() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let response = app.server.get("/api/stats").await;

    response.assert_status_ok();
    assert_json_content(&response);
    let body: Value = response.json();
    assert_eq!(body["count"].as_u64(), Some(2));
    assert_eq!(body["total_likes"].as_u64(), Some(1010));
    assert_eq!(body["favorite"]["title"].as_str(), Some("Autoblogi"));

    Ok(())
}

#[tokio::test]
async fn test_stats_of_empty_store() -> anyhow::Result<()> {
    let app = TestApp::empty()?;

    let response = app.server.get("/api/stats").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"].as_u64(), Some(0));
    assert_eq!(body["total_likes"].as_u64(), Some(0));
    assert!(body["favorite"].is_null());

    Ok(())
}

#[tokio::test]
async fn test_blog_without_likes_adds_nothing_to_stats() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    app.create(&json!({ "title": "Matkailublogi", "url": "www.matkusteluonkivaa.fi" }))
        .await;

    let body: Value = app.server.get("/api/stats").await.json();
    assert_eq!(body["count"].as_u64(), Some(3));
    assert_eq!(body["total_likes"].as_u64(), Some(1010));

    Ok(())
}

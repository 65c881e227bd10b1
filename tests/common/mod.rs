//! Shared fixtures for the HTTP API tests.

#![cfg(feature = "server")]
#![allow(dead_code)]

use axum::http::{StatusCode, header};
use axum_test::{TestResponse, TestServer};
use serde_json::{Value, json};
use tempfile::TempDir;

use blog_list::server::{AppState, router};
use blog_list::{Blog, BlogStore, NewBlog};

/// The two blogs every test starts from.
pub fn initial_blogs() -> Vec<NewBlog> {
    vec![
        NewBlog::new("Ruokablogi", "www.ruokaonhyvaa.fi")
            .with_author("Kokki Kolmonen")
            .with_likes(10),
        NewBlog::new("Autoblogi", "www.autoblogi.fi")
            .with_author("Kari Taalasmaa")
            .with_likes(1000),
    ]
}

/// A blog body as a client would post it.
pub fn matkailublogi() -> Value {
    json!({
        "title": "Matkailublogi",
        "author": "Matti Matkustelija",
        "url": "www.matkusteluonkivaa.fi",
        "likes": 500
    })
}

/// Test application wrapper that manages a temporary blog store.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    _temp_dir: TempDir, // Keep alive for test duration
}

impl TestApp {
    /// A fresh store seeded with [`initial_blogs`].
    pub fn new() -> anyhow::Result<Self> {
        let app = Self::empty()?;
        app.state.store().insert_many(initial_blogs())?;
        Ok(app)
    }

    /// A fresh, empty store.
    pub fn empty() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let store = BlogStore::init(temp_dir.path().join("db"))?;
        let state = AppState::new(store);
        let server = TestServer::new(router(state.clone()))?;
        Ok(Self {
            server,
            state,
            _temp_dir: temp_dir,
        })
    }

    /// All blogs as returned by `GET /api/blogs`.
    pub async fn blogs(&self) -> Vec<Blog> {
        let response = self.server.get("/api/blogs").await;
        response.assert_status_ok();
        response.json()
    }

    /// Post a blog and assert it was created.
    pub async fn create(&self, body: &Value) -> Blog {
        let response = self.server.post("/api/blogs").json(body).await;
        response.assert_status(StatusCode::CREATED);
        assert_json_content(&response);
        response.json()
    }
}

/// Assert the response declares a JSON body.
pub fn assert_json_content(response: &TestResponse) {
    let content_type = response.header(header::CONTENT_TYPE);
    let content_type = content_type.to_str().unwrap_or_default();
    assert!(
        content_type.starts_with("application/json"),
        "Expected a JSON response, got Content-Type '{}'",
        content_type
    );
}

/// Assert the response is a JSON error with the given code.
pub fn assert_error_code(response: &TestResponse, status: StatusCode, code: &str) {
    response.assert_status(status);
    let body: Value = response.json();
    assert_eq!(
        body["error"]["code"].as_str(),
        Some(code),
        "Unexpected error body: {}",
        body
    );
}

//! API routes and handlers.

mod blogs;
mod stats;

use axum::{Router, routing::get};

use super::state::AppState;

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/blogs",
            get(blogs::list_blogs).post(blogs::create_blog),
        )
        .route(
            "/api/blogs/{id}",
            get(blogs::get_blog)
                .put(blogs::update_blog)
                .delete(blogs::delete_blog),
        )
        .route("/api/stats", get(stats::blog_stats))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

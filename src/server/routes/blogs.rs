//! Blog CRUD handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::blog::{Blog, BlogId, BlogUpdate, NewBlog};

use super::super::{error::ApiError, state::AppState};

/// List every blog, oldest first.
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>, ApiError> {
    let blogs = state.store().list()?;
    Ok(Json(blogs))
}

/// Get a single blog.
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Blog>, ApiError> {
    let id: BlogId = id.parse()?;
    let blog = state
        .store()
        .get(&id)?
        .ok_or_else(|| ApiError::blog_not_found(&id))?;
    Ok(Json(blog))
}

/// Create a blog. `likes` defaults to 0; `title` and `url` are required.
pub async fn create_blog(
    State(state): State<AppState>,
    payload: Result<Json<NewBlog>, JsonRejection>,
) -> Result<(StatusCode, Json<Blog>), ApiError> {
    let Json(new_blog) = payload?;
    let blog = state.store().create(new_blog)?;
    tracing::info!(id = %blog.id, title = %blog.title, "blog added");
    Ok((StatusCode::CREATED, Json(blog)))
}

/// Replace the fields present in the body.
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BlogUpdate>, JsonRejection>,
) -> Result<Json<Blog>, ApiError> {
    let id: BlogId = id.parse()?;
    let Json(update) = payload?;
    let blog = state
        .store()
        .update(&id, update)?
        .ok_or_else(|| ApiError::blog_not_found(&id))?;
    Ok(Json(blog))
}

/// Delete a blog. Deleting a missing blog is not an error.
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: BlogId = id.parse()?;
    if state.store().delete(&id)? {
        tracing::info!(id = %id, "blog deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

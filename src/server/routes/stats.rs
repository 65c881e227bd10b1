//! Like statistics over the whole collection.

use axum::{Json, extract::State};

use crate::list_helper::{self, BlogStats};

use super::super::{error::ApiError, state::AppState};

/// Blog count, total likes and the most liked blog.
pub async fn blog_stats(State(state): State<AppState>) -> Result<Json<BlogStats>, ApiError> {
    let blogs = state.store().list()?;
    Ok(Json(list_helper::stats(&blogs)))
}

//! Blog post handlers. All of them run behind `jwt_auth_middleware`, so an
//! `AuthUser` is always present in the request extensions.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::database::{NewPost, PostChanges};
use crate::error::ApiError;
use crate::inputs::{CreatePostInput, InputShape, UpdatePostInput};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// POST / - create a post owned by the caller
///
/// Expected Input:
/// ```json
/// { "title": "string", "content": "string" }
/// ```
///
/// Expected Output:
/// ```json
/// { "id": "generated id" }
/// ```
pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let input: CreatePostInput = parse_body(&body, state.legacy_validation_status)?;

    let post = state
        .store
        .create(NewPost {
            title: input.title,
            content: input.content,
            author_id: user.user_id,
        })
        .await?;

    tracing::info!("Created post {} for {}", post.id, post.author_id);
    Ok(Json(json!({ "id": post.id })))
}

/// PUT / - replace title and content of a post the caller owns
///
/// A post that does not exist and a post owned by someone else are
/// indistinguishable to the caller: both answer 404.
pub async fn update_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let input: UpdatePostInput = parse_body(&body, state.legacy_validation_status)?;

    let post = state
        .store
        .update_owned(
            &input.id,
            &user.user_id,
            PostChanges {
                title: input.title,
                content: input.content,
            },
        )
        .await?;

    tracing::info!("Updated post {} for {}", post.id, post.author_id);
    Ok("post updated")
}

/// GET /:id - fetch any post by id, `null` when absent
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let post = state.store.find_by_id(&id).await?;

    let body = match post {
        Some(post) => serde_json::to_value(post).map_err(|e| {
            tracing::error!("JSON serialization error: {}", e);
            ApiError::internal_server_error("Failed to format response")
        })?,
        None => Value::Null,
    };
    Ok(Json(body))
}

/// Unreadable JSON and shape mismatches are both reported as invalid input.
/// The body is parsed as JSON whatever its `Content-Type` says.
fn parse_body<T: InputShape>(body: &[u8], legacy_status: bool) -> Result<T, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Unreadable request body: {}", e);
        ApiError::invalid_input(legacy_status)
    })?;

    T::safe_parse(&value).map_err(|e| {
        tracing::debug!("{}", e);
        ApiError::invalid_input(legacy_status)
    })
}

//! Request handlers. Each one validates its input, runs a single SDK call on
//! the blocking pool, and serializes the resulting view.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use scribe_sdk::{
    AuthorView, CreateAuthorRequest, CreateCommentRequest, CreatePostRequest, PostView, Scribe,
    SdkResult, UpdateAuthorRequest, UpdatePostRequest,
};
use scribe_types::{AuthorId, BlogpostId};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath};

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub scribe: Scribe,
}

impl AppState {
    pub fn new(scribe: Scribe) -> Self {
        Self { scribe }
    }

    /// Run a store-bound call off the async executor.
    async fn run<T, F>(&self, f: F) -> ApiResult<T>
    where
        F: FnOnce(&Scribe) -> SdkResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let scribe = self.scribe.clone();
        let out = tokio::task::spawn_blocking(move || f(&scribe))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok(out?)
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler() -> Json<Value> {
    Json(json!({
        "name": "scribe-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---- Authors ----

pub async fn list_authors(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let authors = state.run(|s| s.list_authors()).await?;
    Ok(Json(json!({ "authors": authors })))
}

pub async fn get_author(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<AuthorView>> {
    let id: AuthorId = id.parse()?;
    Ok(Json(state.run(move |s| s.get_author(&id)).await?))
}

pub async fn create_author(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateAuthorRequest>,
) -> ApiResult<(StatusCode, Json<AuthorView>)> {
    let new = body.validate()?;
    let view = state.run(move |s| s.create_author(new)).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn update_author(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<UpdateAuthorRequest>,
) -> ApiResult<Json<AuthorView>> {
    let id: AuthorId = id.parse()?;
    let patch = body.validate(&id)?;
    Ok(Json(state.run(move |s| s.update_author(&id, &patch)).await?))
}

pub async fn delete_author(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<StatusCode> {
    let id: AuthorId = id.parse()?;
    state.run(move |s| s.delete_author(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Blogposts ----

pub async fn list_blogposts(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let blogposts = state.run(|s| s.list_blogposts()).await?;
    Ok(Json(json!({ "blogposts": blogposts })))
}

pub async fn get_blogpost(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<PostView>> {
    let id: BlogpostId = id.parse()?;
    Ok(Json(state.run(move |s| s.get_blogpost(&id)).await?))
}

pub async fn create_blogpost(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreatePostRequest>,
) -> ApiResult<(StatusCode, Json<PostView>)> {
    let new = body.validate()?;
    let view = state.run(move |s| s.create_blogpost(new)).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn update_blogpost(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<UpdatePostRequest>,
) -> ApiResult<Json<PostView>> {
    let id: BlogpostId = id.parse()?;
    let patch = body.validate(&id)?;
    Ok(Json(state.run(move |s| s.update_blogpost(&id, &patch)).await?))
}

pub async fn delete_blogpost(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<StatusCode> {
    let id: BlogpostId = id.parse()?;
    state.run(move |s| s.delete_blogpost(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<PostView>)> {
    let id: BlogpostId = id.parse()?;
    let content = body.validate()?;
    let view = state.run(move |s| s.add_comment(&id, &content)).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

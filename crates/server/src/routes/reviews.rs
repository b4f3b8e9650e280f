use axum::{
    extract::{Path, Query, State},
    response::Response,
    Extension, Json,
};
use serde_json::Value;
use tracing::info;

use models::document::documents_to_json;
use models::{DeleteAck, InsertAck};
use service::auth::domain::Claims;

use crate::errors::ApiError;
use crate::routes::{
    auth::{authorized_email, ServerState},
    document_or_empty, EmailQuery,
};

#[utoipa::path(post, path = "/reviews", tag = "reviews", request_body = crate::openapi::ReviewDoc, responses((status = 200, description = "Insert acknowledgment"), (status = 400, description = "Body is not an object")))]
pub async fn create(State(state): State<ServerState>, Json(body): Json<Value>) -> Result<Json<InsertAck>, ApiError> {
    Ok(Json(state.kitchen.create_review(body).await?))
}

#[utoipa::path(get, path = "/reviews", tag = "reviews", responses((status = 200, description = "Every review")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Value>, ApiError> {
    let docs = state.kitchen.reviews().await?;
    Ok(Json(documents_to_json(docs)))
}

/// Reviews for the caller's own email. Without `email` every review is returned.
#[utoipa::path(get, path = "/review", tag = "reviews", params(EmailQuery), security(("bearer" = [])), responses((status = 200, description = "Matching reviews"), (status = 401, description = "No Authorization header"), (status = 403, description = "Invalid token or email mismatch")))]
pub async fn list_by_email(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Value>, ApiError> {
    let email = authorized_email(&claims, query.email.as_deref())?;
    let docs = state.kitchen.reviews_by_email(email).await?;
    Ok(Json(documents_to_json(docs)))
}

#[utoipa::path(get, path = "/review/{id}", tag = "reviews", params(("id" = String, Path, description = "ObjectId hex")), responses((status = 200, description = "The review, or an empty body when absent"), (status = 400, description = "Malformed id")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let doc = state.kitchen.review(&id).await?;
    Ok(document_or_empty(doc))
}

#[utoipa::path(delete, path = "/review/{id}", tag = "reviews", params(("id" = String, Path, description = "ObjectId hex")), responses((status = 200, description = "Delete acknowledgment"), (status = 400, description = "Malformed id")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<DeleteAck>, ApiError> {
    info!(%id, "delete review requested");
    Ok(Json(state.kitchen.delete_review(&id).await?))
}

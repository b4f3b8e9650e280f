use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use serde_json::Value;

use models::document::documents_to_json;

use crate::errors::ApiError;
use crate::routes::{auth::ServerState, document_or_empty};

/// The first three services in store order, for the landing page.
#[utoipa::path(get, path = "/service", tag = "services", responses((status = 200, description = "Up to three services")))]
pub async fn featured(State(state): State<ServerState>) -> Result<Json<Value>, ApiError> {
    let docs = state.kitchen.featured_services().await?;
    Ok(Json(documents_to_json(docs)))
}

#[utoipa::path(get, path = "/services", tag = "services", responses((status = 200, description = "Every service")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Value>, ApiError> {
    let docs = state.kitchen.services().await?;
    Ok(Json(documents_to_json(docs)))
}

#[utoipa::path(get, path = "/services/{id}", tag = "services", params(("id" = String, Path, description = "ObjectId hex")), responses((status = 200, description = "The service, or an empty body when absent"), (status = 400, description = "Malformed id")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let doc = state.kitchen.service(&id).await?;
    Ok(document_or_empty(doc))
}

#[utoipa::path(get, path = "/cateringData", tag = "services", responses((status = 200, description = "Every catering package")))]
pub async fn catering(State(state): State<ServerState>) -> Result<Json<Value>, ApiError> {
    let docs = state.kitchen.catering_data().await?;
    Ok(Json(documents_to_json(docs)))
}

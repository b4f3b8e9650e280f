use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde_json::Value;

use models::document::documents_to_json;
use models::InsertAck;
use service::auth::domain::Claims;

use crate::errors::ApiError;
use crate::routes::{
    auth::{authorized_email, ServerState},
    EmailQuery,
};

#[utoipa::path(post, path = "/orders", tag = "orders", request_body = crate::openapi::OrderDoc, responses((status = 200, description = "Insert acknowledgment"), (status = 400, description = "Body is not an object")))]
pub async fn create(State(state): State<ServerState>, Json(body): Json<Value>) -> Result<Json<InsertAck>, ApiError> {
    Ok(Json(state.kitchen.create_order(body).await?))
}

/// Orders for the caller's own email. Without `email` every order is returned.
#[utoipa::path(get, path = "/orders", tag = "orders", params(EmailQuery), security(("bearer" = [])), responses((status = 200, description = "Matching orders"), (status = 401, description = "No Authorization header"), (status = 403, description = "Invalid token or email mismatch")))]
pub async fn list_by_email(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Value>, ApiError> {
    let email = authorized_email(&claims, query.email.as_deref())?;
    let docs = state.kitchen.orders_by_email(email).await?;
    Ok(Json(documents_to_json(docs)))
}

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Json,
};
use serde_json::Value;
use tracing::{debug, warn};

use service::auth::domain::{Claims, TokenResponse};
use service::{KitchenService, TokenService};

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub kitchen: KitchenService,
    pub tokens: Arc<TokenService>,
}

impl ServerState {
    pub fn new(kitchen: KitchenService, tokens: TokenService) -> Self {
        Self { kitchen, tokens: Arc::new(tokens) }
    }
}

/// Mint a token from whatever object the client posts. There is no credential check.
#[utoipa::path(post, path = "/jwt", tag = "auth", request_body = crate::openapi::TokenRequestDoc, responses((status = 200, description = "Signed token", body = crate::openapi::TokenResponseDoc), (status = 400, description = "Payload is not an object")))]
pub async fn issue_token(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.tokens.sign(payload)?;
    Ok(Json(TokenResponse { token }))
}

/// Route middleware: verify `Authorization: Bearer <token>` and stash the claims.
///
/// A missing header is 401; anything else that fails verification is 403.
/// The token is whatever follows the first space, whatever the scheme word says.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();

    let Some(header) = req.headers().get(AUTHORIZATION) else {
        warn!(path = %path, "missing Authorization header");
        return Err(ApiError::MissingToken);
    };
    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.split_once(' '))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::InvalidToken)?;

    let claims = state.tokens.verify(token).map_err(|e| {
        warn!(path = %path, code = e.code(), err = %e, "token validation failed");
        ApiError::from(e)
    })?;
    debug!(path = %path, email = claims.email().unwrap_or_default(), "token accepted");

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Resolve the email filter for a gated listing.
///
/// No email (or an empty one) means "no filter" and skips the claim comparison.
/// Otherwise the token's email claim must match exactly.
pub fn authorized_email<'a>(claims: &Claims, requested: Option<&'a str>) -> Result<Option<&'a str>, ApiError> {
    match requested.filter(|e| !e.is_empty()) {
        None => Ok(None),
        Some(email) if claims.email() == Some(email) => Ok(Some(email)),
        Some(_) => Err(ApiError::EmailMismatch),
    }
}

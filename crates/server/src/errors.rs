use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use common::types::Message;
use models::errors::ModelError;
use service::auth::errors::TokenError;
use service::errors::ServiceError;

/// Every failure a handler or the token gate can surface.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No `Authorization` header at all.
    #[error("Unauthorized access")]
    MissingToken,
    /// Header present but the token does not verify.
    #[error("Forbidden access")]
    InvalidToken,
    /// Token verifies but its email claim differs from the requested email.
    #[error("unauthorized access")]
    EmailMismatch,
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken | ApiError::EmailMismatch => StatusCode::FORBIDDEN,
            ApiError::InvalidId(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Model(ModelError::InvalidId(id)) => ApiError::InvalidId(id),
            ServiceError::Model(e @ (ModelError::NotAnObject | ModelError::Conversion(_))) => {
                ApiError::BadRequest(e.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::InvalidPayload => ApiError::BadRequest(e.to_string()),
            TokenError::Sign(msg) => ApiError::Internal(msg),
            TokenError::Invalid(_) | TokenError::Expired => ApiError::InvalidToken,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Internal(detail) => error!(error = %detail, "request failed"),
            other => warn!(status = status.as_u16(), error = %other, "request rejected"),
        }
        (status, Json(Message::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_failures_map_to_gate_statuses() {
        assert_eq!(ApiError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::from(TokenError::Expired).status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::from(TokenError::InvalidPayload).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failures_hide_details() {
        let err = ApiError::from(ServiceError::Store("connection reset".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "internal server error");
    }

    #[test]
    fn malformed_ids_are_bad_requests() {
        let err = ApiError::from(ServiceError::Model(ModelError::InvalidId("zzz".into())));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid id: zzz");
    }
}

pub mod auth;
pub mod orders;
pub mod reviews;
pub mod services;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Health, GREETING};
use models::{document::document_to_json, Document};

use crate::openapi::ApiDoc;
use auth::ServerState;

/// `?email=` on the gated listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Only return documents whose `email` equals this value.
    pub email: Option<String>,
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Greeting", body = String)))]
pub async fn root() -> &'static str {
    GREETING
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// A found document as JSON, or a 200 with an empty body when nothing matched.
pub(crate) fn document_or_empty(doc: Option<Document>) -> Response {
    match doc {
        Some(doc) => Json(document_to_json(doc)).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

/// Build the full application router: public routes, token-gated listings, and docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let gate = || middleware::from_fn_with_state(state.clone(), auth::require_bearer_token);

    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/jwt", post(auth::issue_token))
        .route("/service", get(services::featured))
        .route("/services", get(services::list))
        .route("/services/:id", get(services::get))
        .route("/cateringData", get(services::catering))
        .route("/reviews", get(reviews::list).post(reviews::create))
        .route("/review/:id", get(reviews::get).delete(reviews::delete));

    // Only the GET handlers sit behind the gate; POST /orders stays open.
    let gated = Router::new()
        .route("/review", get(reviews::list_by_email).route_layer(gate()))
        .route("/orders", get(orders::list_by_email).route_layer(gate()).post(orders::create));

    public
        .merge(gated)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

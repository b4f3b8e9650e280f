use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Any JSON object; `email` is what the gated routes compare against.
#[derive(ToSchema)]
pub struct TokenRequestDoc { pub email: String }

#[derive(ToSchema)]
pub struct TokenResponseDoc { pub token: String }

/// Stored as-is. Only `email` is read by the server.
#[derive(ToSchema)]
pub struct ReviewDoc { pub email: String }

/// Stored as-is. Only `email` is read by the server.
#[derive(ToSchema)]
pub struct OrderDoc { pub email: String }

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::auth::issue_token,
        crate::routes::services::featured,
        crate::routes::services::list,
        crate::routes::services::get,
        crate::routes::services::catering,
        crate::routes::reviews::create,
        crate::routes::reviews::list,
        crate::routes::reviews::list_by_email,
        crate::routes::reviews::get,
        crate::routes::reviews::delete,
        crate::routes::orders::create,
        crate::routes::orders::list_by_email,
    ),
    components(
        schemas(
            HealthResponse,
            TokenRequestDoc,
            TokenResponseDoc,
            ReviewDoc,
            OrderDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "services"),
        (name = "reviews"),
        (name = "orders")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/jwt", "/service", "/services", "/services/{id}", "/cateringData", "/reviews", "/review", "/review/{id}", "/orders"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        assert!(doc.components.unwrap().security_schemes.contains_key("bearer"));
    }
}

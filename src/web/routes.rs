//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    extract::Request,
    http::{
        header::{self, HeaderName, HeaderValue},
        Method, StatusCode,
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};

const ALLOW_HEADERS: &str = "Content-Type,Authorization,X-Requested-With,X-Real-IP,X-Forwarded-For";
const ALLOW_METHODS: &str = "GET,PUT,POST,DELETE,OPTIONS";

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-real-ip"),
            HeaderName::from_static("x-forwarded-for"),
        ])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handlers::index))
        // Search routes
        .route("/search", get(handlers::search))
        .route("/api/search", get(handlers::search))
        // API routes
        .route("/api/engines", get(handlers::engines))
        .route("/api/health", get(handlers::health))
        // Add middleware
        .layer(cors)
        .layer(middleware::from_fn(preflight))
        // Add state
        .with_state(state)
}

/// Answer every OPTIONS request directly, whatever the path
async fn preflight(request: Request, next: Next) -> Response {
    if request.method() != Method::OPTIONS {
        return next.run(request).await;
    }

    let mut response = (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
        .into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    response
}

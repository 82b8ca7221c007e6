//! HTTP server implementation for Farmstead
//!
//! This module sets up the Axum web server with all routes, middleware,
//! and graceful shutdown handling.

use axum::{
    extract::MatchedPath,
    http::{header, Method, Request},
    routing::{get, post, put},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderName;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use uuid::Uuid;

use crate::{
    api::{animals, auth, sales, stats, AppState, MessageResponse},
    config::Config,
    db,
    error::Result,
};

/// Request ID generator
#[derive(Clone, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(id.parse().ok()?))
    }
}

/// Create the main application router
pub fn create_router(config: Arc<Config>, state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/dashboard", get(stats::dashboard))
        .route(
            "/animals",
            get(animals::list_animals).post(animals::create_animal),
        )
        .route("/animals/:id", put(animals::update_animal))
        .route("/animals/tag/:tag_id", get(animals::get_animal_by_tag))
        .route("/sales", get(sales::list_sales).post(sales::create_sale))
        .route("/profit", get(stats::profit))
        .route("/reports", get(stats::reports))
        .with_state(state);

    let app = Router::new().nest("/api", api_routes);

    // Apply middleware
    app.layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            MakeRequestUuid::default(),
        ))
        // Permissive CORS so the web client can call the API
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path =
                        request.extensions().get::<MatchedPath>().map(MatchedPath::as_str);
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "http_request",
                        method = ?request.method(),
                        matched_path,
                        request_id,
                        latency = tracing::field::Empty,
                        status = tracing::field::Empty,
                    )
                })
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing::Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}

/// GET /api/health - liveness check
async fn health_check() -> Json<MessageResponse> {
    Json(MessageResponse::ok("Service is running"))
}

/// Create and start the HTTP server
///
/// Connecting to the record store happens first and is fatal on failure;
/// the pool error message distinguishes credential failure from an
/// unreachable server.
pub async fn create_server(config: Arc<Config>) -> Result<()> {
    let pool = db::create_pool(&config.database).await?;
    db::run_migrations(&pool).await?;

    let state = AppState::new(pool);
    db::seed_defaults(state.users.as_ref(), state.animals.as_ref()).await?;

    let app = create_router(config.clone(), state);
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|e| crate::error::Error::config(format!("Invalid server address: {}", e)))?;

    tracing::info!(
        address = %addr,
        environment = %config.server.environment,
        "Starting HTTP server"
    );

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| crate::error::Error::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!(
        address = %addr,
        "HTTP server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| crate::error::Error::internal(format!("Server error: {}", e)))
}

/// Shutdown signal handler
///
/// Waits for CTRL+C or SIGTERM signals to gracefully shutdown the server.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_config, test_state};
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(test_config(), test_state());

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = create_router(test_config(), test_state());

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/nope")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

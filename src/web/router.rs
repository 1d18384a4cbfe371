//! Router builder shared by `hwcontrol serve` and the integration tests.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, StatusCode};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::web::handlers;
use crate::web::state::AppState;

/// Build the full application [`Router`] with all middleware layers.
///
/// Layers apply bottom-up: request id, tracing, id propagation, timeout,
/// then panic recovery closest to the handlers.
pub fn build_app_router(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .route("/", get(handlers::index))
        .route("/records", get(handlers::records))
        .route("/overdue", get(handlers::overdue))
        .route("/export.csv", get(handlers::export_csv))
        .route("/health", get(handlers::health))
        .route("/register", post(handlers::register))
        .route("/return", post(handlers::mark_returned))
        .route("/hide", post(handlers::hide))
        .route("/extend", post(handlers::extend))
        .route("/notes", post(handlers::add_note))
        .route("/stock", post(handlers::toggle_stock))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .with_state(state)
}

//! ABSENTA API Mock - in-memory backend for tests and local dev
//!
//! Serves the backend contract the client is written against: auth,
//! schedule/attendance, appeals, and letterhead management. State lives
//! in memory and resets on restart.

pub mod api;
pub mod letterhead;
pub mod state;

pub use state::{MockState, MockUser};

use axum::Router;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the mock API router
pub fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/auth/login", post(api::login))
        .route("/api/auth/me", get(api::me))
        .route("/api/auth/logout", post(api::logout))
        .route("/api/schedule/today", get(api::today_schedule))
        .route("/api/schedule", get(api::schedule_by_date))
        .route("/api/attendance", post(api::submit_attendance))
        .route("/api/attendance/batch", post(api::submit_batch))
        .route("/api/appeals", post(api::submit_appeal).get(api::list_appeals))
        .route("/api/appeals/{id}/decision", post(api::decide_appeal))
        .route("/api/letterhead/image", post(letterhead::upload_image))
        .route(
            "/api/letterhead/image/{id}",
            get(letterhead::fetch_image).delete(letterhead::delete_image),
        )
        .route(
            "/api/letterhead/config",
            get(letterhead::get_config).put(letterhead::update_config),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind an ephemeral port and serve the mock in a background task.
///
/// Returns the bound address; used by the client integration tests.
pub async fn spawn(
    state: Arc<MockState>,
) -> std::io::Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(state);
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("mock server error: {}", e);
        }
    });
    Ok((addr, handle))
}

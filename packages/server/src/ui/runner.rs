//! Router assembly and server runner.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router, middleware,
    routing::{any, get, post},
};
use tower_http::trace::TraceLayer;

use super::{auth::require_auth, handler, signal::shutdown_signal, state::AppState};

/// Build the application router.
///
/// Every `/api/request-video-call` route sits behind the bearer-token auth
/// middleware; `/api/health` and the signaling channel `/ws` do not.
pub fn build_router(state: Arc<AppState>) -> Router {
    let call_routes = Router::new()
        .route("/request", post(handler::request_video_call))
        .route("/college-requests", get(handler::get_college_requests))
        .route("/recruiter-requests", get(handler::get_recruiter_requests))
        .route("/accept", post(handler::accept_video_call_request))
        .route("/schedule", post(handler::schedule_video_call))
        .route("/join", post(handler::join_video_call))
        .route("/complete", post(handler::complete_video_call))
        .route("/scheduled-calls", get(handler::get_scheduled_calls))
        .route(
            "/students/{college_name}",
            get(handler::get_students_by_college),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/api/health", get(handler::health_check))
        .nest("/api/request-video-call", call_routes)
        .route("/ws", any(handler::websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until a shutdown signal arrives.
pub async fn run(addr: SocketAddr, state: Arc<AppState>) -> Result<(), std::io::Error> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    tracing::info!("Signaling endpoint: ws://{}/ws", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

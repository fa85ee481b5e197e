use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Auth Router Module
///
/// The credentials flow. Everything under `/api/auth` is bypassed by the gatekeeper
/// regardless of session state, so these handlers decide for themselves what a missing
/// session means.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        // GET /login
        // The only auth page. Signed-in visitors are redirected to their landing page
        // before reaching the handler.
        .route("/login", get(handlers::login_page))
        // POST /api/auth/login
        // Form-encoded `stu_id` + `password`, verified against the club backend.
        .route("/api/auth/login", post(handlers::login))
        // POST /api/auth/logout
        .route("/api/auth/logout", post(handlers::logout))
        // GET /api/auth/session
        .route("/api/auth/session", get(handlers::get_session))
}

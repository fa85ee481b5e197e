use crate::{AppState, auth::Session, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Dashboard pages for any signed-in member. Anonymous callers are redirected to
/// `/login` by the gatekeeper's login gate.
pub fn authenticated_routes() -> Router<AppState> {
    Router::new()
        // GET /dashboard/overview
        // Default landing page after sign-in and for role-gate redirects.
        .route(
            "/dashboard/overview",
            get(|s: Session| handlers::dashboard_page("dashboard/overview", s)),
        )
        .route(
            "/dashboard/userProfile",
            get(|s: Session| handlers::dashboard_page("dashboard/userProfile", s)),
        )
        .route(
            "/dashboard/personalData",
            get(|s: Session| handlers::dashboard_page("dashboard/personalData", s)),
        )
}

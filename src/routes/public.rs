use crate::{AppState, auth::Session, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Pages and endpoints listed in the public route table. The gatekeeper lets anonymous
/// callers through; signed-in callers are still identified as the viewer.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|s: Option<Session>| handlers::public_page("index", s)))
        .route("/home", get(|s: Option<Session>| handlers::public_page("home", s)))
        .route(
            "/documentation",
            get(|s: Option<Session>| handlers::public_page("documentation", s)),
        )
        .route("/about", get(|s: Option<Session>| handlers::public_page("about", s)))
        .route("/stories", get(|s: Option<Session>| handlers::public_page("stories", s)))
        // GET /blog/{id}
        // Covered by the `/blog/*` wildcard entry.
        .route("/blog/{id}", get(handlers::blog_post))
        // GET /api/hello
        // Liveness check for monitoring and load balancers.
        .route("/api/hello", get(handlers::hello))
}

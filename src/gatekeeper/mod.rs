//! Request Gatekeeper
//!
//! Decides, once per request, whether the caller may reach the handler or must be
//! redirected. The rules run in a fixed order against the static route tables.

pub mod matcher;
pub mod rules;
pub mod tables;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::AppState;

pub use rules::{Decision, evaluate};
pub use tables::RouteTables;

/// gatekeeper
///
/// The middleware wrapping every route. Skips paths the upstream matcher excludes,
/// awaits the session resolver, then applies the gatekeeper decision. On `Proceed` the
/// resolved session is stored in the request extensions for the `Session` extractor.
pub async fn gatekeeper(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if !matcher::is_gated(&path) {
        return next.run(request).await;
    }

    let session = state.sessions.resolve(request.headers()).await;

    match evaluate(&state.tables, &path, session.as_ref()) {
        Decision::Proceed => {
            tracing::trace!(%path, signed_in = session.is_some(), "gatekeeper: proceed");
            if let Some(session) = session {
                request.extensions_mut().insert(session);
            }
            next.run(request).await
        }
        Decision::RedirectTo(target) => {
            tracing::info!(
                %path,
                redirect_to = target,
                role_id = ?session.as_ref().and_then(|s| s.user.role_id),
                "gatekeeper: redirect"
            );
            Redirect::temporary(target).into_response()
        }
    }
}

use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    middleware,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod club_api;
pub mod config;
pub mod gatekeeper;
pub mod handlers;
pub mod models;

// Route groups (public, auth subsystem, authenticated, role-restricted).
pub mod routes;
use routes::{auth as auth_routes, authenticated, public, restricted};

// --- Public Re-exports ---

pub use auth::{JwtSessionResolver, SessionState};
pub use club_api::{ClubApiState, HttpClubApi};
pub use config::AppConfig;
pub use gatekeeper::RouteTables;

/// ApiDoc
///
/// OpenAPI document for the portal's JSON endpoints, served at `/api-docs/openapi.json`
/// in local mode.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::login, handlers::logout, handlers::get_session, handlers::hello),
    components(
        schemas(
            auth::Session, auth::SessionUser, models::LoginForm, models::ErrorResponse,
            models::HelloResponse, models::PageView, models::Viewer,
        )
    ),
    tags(
        (name = "club-portal", description = "School club portal API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, immutable container shared by every request: the route tables consulted
/// by the gatekeeper, the session resolver, the club backend client and configuration.
#[derive(Clone)]
pub struct AppState {
    /// Route classification tables, built once at startup.
    pub tables: Arc<RouteTables>,
    /// Resolves the optional session of a request.
    pub sessions: SessionState,
    /// Remote club/student backend.
    pub club_api: ClubApiState,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for SessionState {
    fn from_ref(app_state: &AppState) -> SessionState {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for ClubApiState {
    fn from_ref(app_state: &AppState) -> ClubApiState {
        app_state.club_api.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the routing structure, wraps every route (and the fallback) in the
/// gatekeeper, then applies the observability and CORS layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 1. Route Assembly
    // Route groups carry no access logic. Swagger UI is local-only and sits behind the
    // gatekeeper like every other page.
    let mut routes = Router::new()
        .merge(public::public_routes())
        .merge(auth_routes::auth_routes())
        .merge(authenticated::authenticated_routes())
        .merge(restricted::restricted_routes());

    if state.config.env == config::Env::Local {
        routes = routes
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    // 2. Gatekeeper: runs ahead of every handler above.
    let router = routes
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gatekeeper::gatekeeper,
        ))
        .with_state(state);

    // 3. Observability and Correlation Layers
    router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: a UUID for every incoming request.
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    MakeRequestUuid,
                ))
                // 3b. Request Tracing: one span per request, tagged with the request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: echo x-request-id back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request span with method, URI and the `x-request-id` header so every
/// log line of one request, gatekeeper decisions included, is correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}

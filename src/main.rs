use club_portal::{
    AppState, HttpClubApi, JwtSessionResolver, RouteTables,
    club_api::ClubApiState,
    config::{AppConfig, Env},
    create_router,
    auth::SessionState,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point: configuration, logging, collaborators, route tables, HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // RUST_LOG wins; otherwise verbose defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "club_portal=debug,tower_http=info,axum=trace".into());

    // 3. Log format by environment: pretty locally, JSON for aggregators in production.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Route tables: loaded once, read-only for the lifetime of the process.
    let tables = Arc::new(RouteTables::club_portal());

    // 5. Collaborators: session resolver and club backend client.
    let sessions = Arc::new(JwtSessionResolver::new(&config.session_secret)) as SessionState;
    let club_api = Arc::new(HttpClubApi::new(&config.backend_url)) as ClubApiState;
    tracing::info!(backend = %config.backend_url, "club backend configured");

    let bind_addr = config.bind_addr.clone();
    let app_state = AppState {
        tables,
        sessions,
        club_api,
        config,
    };

    // 6. Router and Server Startup
    let app = create_router(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: Failed to bind the HTTP listener. Check BIND_ADDR.");

    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly.");
}

use std::env;

/// Local fallback for the session signing secret. Never used in production.
const LOCAL_SESSION_SECRET: &str = "club-portal-local-session-secret";

/// AppConfig
///
/// Holds the application's entire configuration state. The struct is immutable once
/// loaded and is pulled into handlers and middleware through `FromRef<AppState>`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls cookie hardening, log format and Swagger UI.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // HMAC secret used to sign and verify session tokens.
    pub session_secret: String,
    // Base URL of the remote club/student backend API.
    pub backend_url: String,
    // Lifetime of an issued session, in seconds.
    pub session_ttl_secs: u64,
}

/// Env
///
/// Defines the runtime context, used to switch between local development conveniences
/// and production hardening (secure cookies, mandatory secrets, JSON logs).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// Thirty days, matching the lifetime of the `authToken` cookie.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;

impl Default for AppConfig {
    /// Safe, non-panicking configuration for tests and scaffolding.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:3000".to_string(),
            session_secret: LOCAL_SESSION_SECRET.to_string(),
            backend_url: "http://127.0.0.1:8000".to_string(),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads all parameters from environment variables at startup and fails fast.
    ///
    /// # Panics
    /// Panics in `Env::Production` when `SESSION_SECRET` or `BACKEND_URL` is missing,
    /// so the portal never starts with a guessable signing key or no backend.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        match env {
            Env::Local => Self {
                env: Env::Local,
                bind_addr,
                session_secret: env::var("SESSION_SECRET")
                    .unwrap_or_else(|_| LOCAL_SESSION_SECRET.to_string()),
                backend_url: env::var("BACKEND_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
                session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            },
            Env::Production => Self {
                env: Env::Production,
                bind_addr,
                session_secret: env::var("SESSION_SECRET")
                    .expect("FATAL: SESSION_SECRET must be set in production."),
                backend_url: env::var("BACKEND_URL")
                    .expect("FATAL: BACKEND_URL required in prod"),
                session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            },
        }
    }

    /// Session cookies carry the `Secure` attribute only outside local development.
    pub fn secure_cookies(&self) -> bool {
        self.env == Env::Production
    }
}

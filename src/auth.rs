use std::{convert::Infallible, sync::Arc};

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{HeaderMap, header, request::Parts},
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::gatekeeper::tables::LOGIN_PATH;

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "authToken";

/// Role
///
/// The portal roles, carried on the session as the numeric `role_id` issued by the
/// club backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    President,
    Teacher,
    Admin,
}

impl Role {
    /// Maps a backend `role_id` to a role. Unknown ids carry no role at all.
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Role::Student),
            2 => Some(Role::President),
            3 => Some(Role::Teacher),
            99 => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn id(self) -> i64 {
        match self {
            Role::Student => 1,
            Role::President => 2,
            Role::Teacher => 3,
            Role::Admin => 99,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::President => "president",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }
}

/// SessionUser
///
/// The user record stored inside a session, as returned by the club backend's login
/// operation. Every field defaults when absent so that an incomplete token still
/// decodes; a missing `role_id` simply means the caller holds no role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct SessionUser {
    // Opaque token forwarded to the club backend on every API call.
    pub api_token: String,
    pub stu_id: String,
    pub grade: String,
    pub chi_name: String,
    pub eng_name: String,
    #[ts(type = "number | null")]
    pub role_id: Option<i64>,
    pub role_name: String,
    pub last_login_time: String,
    // Per-session identifier assigned when the session is issued.
    pub id: Uuid,
}

/// Session
///
/// The resolved, read-only session attached to a request. The gatekeeper only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Session {
    pub user: SessionUser,
    #[ts(type = "string")]
    pub expires: DateTime<Utc>,
}

impl Session {
    /// The caller's role, if the session carries a recognised `role_id`.
    pub fn role(&self) -> Option<Role> {
        self.user.role_id.and_then(Role::from_id)
    }
}

/// SessionClaims
///
/// JWT payload of a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user: SessionUser,
    /// Issued At (iat).
    pub iat: usize,
    /// Expiration Time (exp). Tokens past this instant resolve to no session.
    pub exp: usize,
}

/// Signs a new session token for `user`, valid for `ttl_secs` seconds.
pub fn issue_session_token(
    user: SessionUser,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp().max(0) as usize;
    let claims = SessionClaims {
        user,
        iat: now,
        exp: now + ttl_secs as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Extracts the raw session token: the `authToken` cookie first, then a Bearer token.
/// A present cookie always wins, even when it later fails to decode.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Builds the `authToken` cookie holding a freshly issued session token.
pub fn session_cookie(token: String, ttl_secs: u64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl_secs as i64))
        .build()
}

/// Cookie used to remove `authToken` from the browser on logout.
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// SessionResolver
///
/// The "get current session" collaborator consulted by the gatekeeper. Implementations
/// never fail: anything that cannot be resolved to a valid session is `None`.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Session>;
}

/// SessionState
///
/// Shared handle to the session resolver held in `AppState`.
pub type SessionState = Arc<dyn SessionResolver>;

/// JwtSessionResolver
///
/// Resolves sessions from HS256-signed tokens. Expired, tampered and malformed tokens
/// are logged at debug level and treated as anonymous.
pub struct JwtSessionResolver {
    key: DecodingKey,
    validation: Validation,
}

impl JwtSessionResolver {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionResolver for JwtSessionResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Session> {
        let token = session_token(headers)?;

        let claims = match decode::<SessionClaims>(&token, &self.key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(error = %e, "discarding unusable session token");
                return None;
            }
        };

        let expires = DateTime::<Utc>::from_timestamp(claims.exp as i64, 0)?;
        Some(Session {
            user: claims.user,
            expires,
        })
    }
}

/// Session Extractor Implementation
///
/// Handlers behind the login gate take `Session` directly. The gatekeeper middleware
/// stores the resolved session in the request extensions; a handler reached without
/// one sends the caller back to the login page.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| Redirect::temporary(LOGIN_PATH))
    }
}

impl<S> OptionalFromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Session>().cloned())
    }
}

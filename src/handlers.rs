use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    AppState,
    auth::{Session, expired_session_cookie, issue_session_token, session_cookie},
    club_api::ClubApiError,
    gatekeeper::tables::{DEFAULT_LOGIN_REDIRECT, DEFAULT_LOGOUT_REDIRECT},
    models::{ErrorResponse, HelloResponse, LoginForm, PageView},
};

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

// --- Auth Subsystem (/api/auth, bypassed by the gatekeeper) ---

/// login
///
/// Verifies the credentials against the club backend, stores the signed session in the
/// `authToken` cookie and sends the browser to the default landing page.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in, redirected to the dashboard"),
        (status = 401, description = "Wrong student id or password", body = ErrorResponse),
        (status = 502, description = "Backend failure", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let user = match state.club_api.login(&form.stu_id, &form.password).await {
        Ok(user) => user,
        Err(ClubApiError::InvalidCredentials) => {
            return error(StatusCode::UNAUTHORIZED, "Student Id or password incorrect.");
        }
        Err(e) => {
            tracing::error!(error = %e, "login failed");
            return error(StatusCode::BAD_GATEWAY, "Something went wrong.");
        }
    };

    let stu_id = user.stu_id.clone();
    let ttl = state.config.session_ttl_secs;
    let token = match issue_session_token(user, &state.config.session_secret, ttl) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "failed to sign session token");
            return error(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.");
        }
    };

    tracing::info!(%stu_id, "student signed in");
    let jar = jar.add(session_cookie(token, ttl, state.config.secure_cookies()));
    (jar, Redirect::to(DEFAULT_LOGIN_REDIRECT)).into_response()
}

/// logout
///
/// Invalidates the backend token, then drops the session cookie. The cookie is kept
/// when the backend refuses, matching what the backend still considers signed in.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 303, description = "Signed out, redirected to the login page"),
        (status = 502, description = "Backend refused the logout", body = ErrorResponse)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    session: Option<Session>,
    jar: CookieJar,
) -> Response {
    if let Some(session) = session {
        if let Err(e) = state.club_api.logout(&session.user.api_token).await {
            tracing::warn!(error = %e, stu_id = %session.user.stu_id, "logout refused");
            return error(StatusCode::BAD_GATEWAY, "Error signing out");
        }
        tracing::info!(stu_id = %session.user.stu_id, "student signed out");
    }

    let jar = jar.remove(expired_session_cookie());
    (jar, Redirect::to(DEFAULT_LOGOUT_REDIRECT)).into_response()
}

/// get_session
///
/// Returns the caller's current session, or `null` when signed out.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses((status = 200, description = "Current session, or null when signed out", body = Session))
)]
pub async fn get_session(session: Option<Session>) -> Json<Option<Session>> {
    Json(session)
}

// --- Public ---

/// hello
///
/// Public liveness check.
#[utoipa::path(
    get,
    path = "/api/hello",
    responses((status = 200, description = "Alive", body = HelloResponse))
)]
pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        name: "club-portal".to_string(),
    })
}

/// Public pages are served to anyone; a signed-in caller is still shown as the viewer.
pub async fn public_page(page: &'static str, session: Option<Session>) -> Json<PageView> {
    Json(PageView::new(page, session.as_ref()))
}

pub async fn blog_post(Path(id): Path<String>, session: Option<Session>) -> Json<PageView> {
    Json(PageView::new(&format!("blog/{id}"), session.as_ref()))
}

/// The login page. Signed-in callers never get here: the gatekeeper redirects them.
pub async fn login_page() -> Json<PageView> {
    Json(PageView::new("login", None))
}

// --- Dashboard (behind the login gate) ---

/// Dashboard pages require a session; role checks already happened in the gatekeeper.
pub async fn dashboard_page(page: &'static str, session: Session) -> Json<PageView> {
    Json(PageView::new(page, Some(&session)))
}

use axum::http::{HeaderMap, HeaderValue, header};
use chrono::Utc;
use club_portal::auth::{
    JwtSessionResolver, Role, SESSION_COOKIE, SessionClaims, SessionResolver, SessionUser,
    issue_session_token, session_cookie, session_token,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;

// --- Helper Functions ---

const TEST_SESSION_SECRET: &str = "test-session-secret-1234567890";

fn teacher() -> SessionUser {
    SessionUser {
        api_token: "XtWCxvyC2bzweK4L5rqaG5VJ01FcgA4__1710458867".to_string(),
        stu_id: "2320610".to_string(),
        grade: "11.6".to_string(),
        chi_name: "钱小川".to_string(),
        eng_name: "Michael".to_string(),
        role_id: Some(3),
        role_name: "teacher".to_string(),
        last_login_time: "2024-10-24 23:47:00".to_string(),
        ..SessionUser::default()
    }
}

fn cookie_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}")).unwrap(),
    );
    headers
}

fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );
    headers
}

fn sign_raw(payload: serde_json::Value, secret: &str) -> String {
    encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

// --- Tests ---

#[tokio::test]
async fn test_resolves_session_from_cookie() {
    let token = issue_session_token(teacher(), TEST_SESSION_SECRET, 3600).unwrap();
    let resolver = JwtSessionResolver::new(TEST_SESSION_SECRET);

    let session = resolver.resolve(&cookie_headers(&token)).await.unwrap();

    assert_eq!(session.user, teacher());
    assert_eq!(session.role(), Some(Role::Teacher));
    assert!(session.expires > Utc::now());
}

#[tokio::test]
async fn test_resolves_session_from_bearer_token() {
    let token = issue_session_token(teacher(), TEST_SESSION_SECRET, 3600).unwrap();
    let resolver = JwtSessionResolver::new(TEST_SESSION_SECRET);

    let session = resolver.resolve(&bearer_headers(&token)).await;

    assert_eq!(session.map(|s| s.user.stu_id), Some("2320610".to_string()));
}

#[tokio::test]
async fn test_cookie_takes_precedence_over_bearer() {
    let mut other = teacher();
    other.stu_id = "1111111".to_string();
    let cookie_token = issue_session_token(teacher(), TEST_SESSION_SECRET, 3600).unwrap();
    let bearer_token = issue_session_token(other, TEST_SESSION_SECRET, 3600).unwrap();

    let mut headers = cookie_headers(&cookie_token);
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {bearer_token}")).unwrap(),
    );

    assert_eq!(session_token(&headers), Some(cookie_token));
}

#[tokio::test]
async fn test_no_token_means_no_session() {
    let resolver = JwtSessionResolver::new(TEST_SESSION_SECRET);
    assert!(resolver.resolve(&HeaderMap::new()).await.is_none());

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
    assert!(resolver.resolve(&headers).await.is_none());
}

#[tokio::test]
async fn test_expired_token_means_no_session() {
    let now = Utc::now().timestamp() as usize;
    let claims = SessionClaims {
        user: teacher(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SESSION_SECRET.as_bytes()),
    )
    .unwrap();

    let resolver = JwtSessionResolver::new(TEST_SESSION_SECRET);
    assert!(resolver.resolve(&cookie_headers(&token)).await.is_none());
}

#[tokio::test]
async fn test_token_signed_with_another_secret_means_no_session() {
    let token = issue_session_token(teacher(), "some-other-secret", 3600).unwrap();
    let resolver = JwtSessionResolver::new(TEST_SESSION_SECRET);

    assert!(resolver.resolve(&cookie_headers(&token)).await.is_none());
}

#[tokio::test]
async fn test_garbage_token_means_no_session() {
    let resolver = JwtSessionResolver::new(TEST_SESSION_SECRET);

    assert!(resolver.resolve(&cookie_headers("not-a-jwt")).await.is_none());
    assert!(resolver.resolve(&bearer_headers("a.b.c")).await.is_none());
}

#[tokio::test]
async fn test_session_without_role_id_resolves_without_role() {
    let exp = Utc::now().timestamp() + 3600;
    let token = sign_raw(
        json!({ "user": { "stu_id": "2320610", "api_token": "t" }, "iat": 0, "exp": exp }),
        TEST_SESSION_SECRET,
    );
    let resolver = JwtSessionResolver::new(TEST_SESSION_SECRET);

    let session = resolver.resolve(&cookie_headers(&token)).await.unwrap();

    assert_eq!(session.user.role_id, None);
    assert_eq!(session.role(), None);
}

#[tokio::test]
async fn test_malformed_role_id_means_no_session() {
    let exp = Utc::now().timestamp() + 3600;
    let token = sign_raw(
        json!({ "user": { "stu_id": "2320610", "role_id": "admin" }, "iat": 0, "exp": exp }),
        TEST_SESSION_SECRET,
    );
    let resolver = JwtSessionResolver::new(TEST_SESSION_SECRET);

    assert!(resolver.resolve(&cookie_headers(&token)).await.is_none());
}

#[test]
fn test_session_cookie_attributes() {
    let cookie = session_cookie("tok".to_string(), 60, true);

    assert_eq!(cookie.name(), SESSION_COOKIE);
    assert_eq!(cookie.value(), "tok");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.max_age(), Some(time::Duration::seconds(60)));
}

#[tokio::test]
async fn test_stale_cookie_shadows_valid_bearer_token() {
    let now = Utc::now().timestamp() as usize;
    let stale = encode(
        &Header::default(),
        &SessionClaims {
            user: teacher(),
            iat: now - 7200,
            exp: now - 3600,
        },
        &EncodingKey::from_secret(TEST_SESSION_SECRET.as_bytes()),
    )
    .unwrap();
    let fresh = issue_session_token(teacher(), TEST_SESSION_SECRET, 3600).unwrap();

    let mut headers = cookie_headers(&stale);
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {fresh}")).unwrap(),
    );

    let resolver = JwtSessionResolver::new(TEST_SESSION_SECRET);
    assert!(resolver.resolve(&headers).await.is_none());
}

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::auth::SessionUser;

/// Backend code for a successful call.
const CODE_OK: &str = "0";
/// Backend code for a wrong student id or password.
const CODE_BAD_CREDENTIALS: &str = "1001";

/// ClubApiError
///
/// Failures of the remote club/student backend, as seen by the portal.
#[derive(Debug, Error)]
pub enum ClubApiError {
    #[error("student id or password incorrect")]
    InvalidCredentials,
    #[error("backend rejected the request with code {code}: {message}")]
    Rejected { code: String, message: String },
    #[error("backend response could not be understood: {0}")]
    MalformedResponse(String),
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// ClubApi
///
/// The slice of the remote club backend the portal's credentials flow depends on.
/// Handlers only see this trait, so tests swap in an in-memory implementation.
#[async_trait]
pub trait ClubApi: Send + Sync {
    /// Verifies student credentials and returns the user record for the new session.
    async fn login(&self, stu_id: &str, password: &str) -> Result<SessionUser, ClubApiError>;

    /// Invalidates the backend token held by a session.
    async fn logout(&self, api_token: &str) -> Result<(), ClubApiError>;
}

/// ClubApiState
///
/// Shared handle to the club backend client held in `AppState`.
pub type ClubApiState = Arc<dyn ClubApi>;

/// Envelope wrapping every backend response. `code` arrives as either a number or a
/// string depending on the endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(deserialize_with = "string_or_number")]
    code: String,
    #[serde(default)]
    msg: Option<String>,
    data: Option<T>,
}

/// User record returned by `student/login`.
#[derive(Debug, Deserialize)]
struct LoginData {
    api_token: String,
    #[serde(deserialize_with = "string_or_number")]
    stu_id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    grade: String,
    #[serde(default)]
    chi_name: String,
    #[serde(default)]
    eng_name: String,
    role_id: i64,
    #[serde(default)]
    role_name: String,
    #[serde(default)]
    last_login_time: String,
}

impl From<LoginData> for SessionUser {
    fn from(data: LoginData) -> Self {
        SessionUser {
            api_token: data.api_token,
            stu_id: data.stu_id,
            grade: data.grade,
            chi_name: data.chi_name,
            eng_name: data.eng_name,
            role_id: Some(data.role_id),
            role_name: data.role_name,
            last_login_time: data.last_login_time,
            id: uuid::Uuid::new_v4(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// HttpClubApi
///
/// `ClubApi` over the backend's form-encoded HTTP endpoints.
#[derive(Clone)]
pub struct HttpClubApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClubApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ClubApi for HttpClubApi {
    async fn login(&self, stu_id: &str, password: &str) -> Result<SessionUser, ClubApiError> {
        // Empty credentials never reach the backend.
        if stu_id.is_empty() || password.is_empty() {
            return Err(ClubApiError::InvalidCredentials);
        }

        let envelope: Envelope<LoginData> = self
            .client
            .post(self.url("/student/login"))
            .form(&[("stu_id", stu_id), ("password", password)])
            .send()
            .await?
            .json()
            .await?;

        match envelope.code.as_str() {
            CODE_OK => envelope.data.map(SessionUser::from).ok_or_else(|| {
                ClubApiError::MalformedResponse("login succeeded without user data".to_string())
            }),
            CODE_BAD_CREDENTIALS => Err(ClubApiError::InvalidCredentials),
            _ => Err(ClubApiError::Rejected {
                code: envelope.code,
                message: envelope.msg.unwrap_or_default(),
            }),
        }
    }

    async fn logout(&self, api_token: &str) -> Result<(), ClubApiError> {
        let envelope: Envelope<Value> = self
            .client
            .post(self.url("/student/logout"))
            .query(&[("token", api_token)])
            .send()
            .await?
            .json()
            .await?;

        if envelope.code == CODE_OK {
            Ok(())
        } else {
            Err(ClubApiError::Rejected {
                code: envelope.code,
                message: envelope.msg.unwrap_or_default(),
            })
        }
    }
}

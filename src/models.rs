use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::auth::Session;

// --- Page Payloads ---

/// Viewer
///
/// The display identity of the signed-in caller, as shown in page headers.
/// The backend `api_token` is deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Viewer {
    pub stu_id: String,
    pub chi_name: String,
    pub eng_name: String,
    pub grade: String,
    pub role_name: String,
}

impl From<&Session> for Viewer {
    fn from(session: &Session) -> Self {
        let user = &session.user;
        Viewer {
            stu_id: user.stu_id.clone(),
            chi_name: user.chi_name.clone(),
            eng_name: user.eng_name.clone(),
            grade: user.grade.clone(),
            role_name: user.role_name.clone(),
        }
    }
}

/// PageView
///
/// Descriptor of a rendered page: which page was served and to whom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PageView {
    pub page: String,
    pub viewer: Option<Viewer>,
}

impl PageView {
    pub fn new(page: &str, session: Option<&Session>) -> Self {
        Self {
            page: page.to_string(),
            viewer: session.map(Viewer::from),
        }
    }
}

/// HelloResponse
///
/// Body of the public `/api/hello` liveness check.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct HelloResponse {
    pub name: String,
}

// --- Request Payloads ---

/// LoginForm
///
/// Form body of `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub stu_id: String,
    #[serde(default)]
    pub password: String,
}

// --- Errors ---

/// ErrorResponse
///
/// JSON body returned whenever an auth endpoint fails.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

use serde::{Deserialize, Serialize};

use super::Media;

/// Profile record linked one-to-one with an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: i64,
    pub document_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub resume: Option<Media>,
}

/// Account as returned by the identity endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: i64,
    #[serde(default)]
    pub document_id: Option<String>,
    pub username: String,
    pub email: String,
    #[serde(default, rename = "user_detail")]
    pub user_detail: Option<UserDetail>,
}

impl AuthUser {
    /// Resume already stored on the profile.
    pub fn stored_resume(&self) -> Option<&Media> {
        self.user_detail.as_ref().and_then(|d| d.resume.as_ref())
    }
}

/// `{ jwt, user }` returned by login and registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub jwt: String,
    pub user: AuthUser,
}

/// Body of `POST /api/user-details` and `PUT /api/user-details/:id` inside `data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailPayload {
    pub first_name: String,
    pub last_name: String,
    /// Media relation in list form: `[id]`, or `[]` for no resume.
    pub resume: Vec<i64>,
    /// Owning account's document id; set only on creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

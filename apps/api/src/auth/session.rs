//! Explicit session context. Handlers extract a `BearerToken`, resolve it into a `Session`, and
//! pass that session into every content-API call that acts on the user's behalf.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Serialize;

use crate::content_client::ContentClient;
use crate::errors::AppError;
use crate::models::user::AuthUser;
use crate::models::Media;

/// Raw token from an `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, PartialEq)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_bearer)
            .map(|token| BearerToken(token.to_string()))
            .ok_or_else(|| AppError::Unauthorized(String::new()))
    }
}

fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// An authenticated user together with the token that proves it.
#[derive(Debug, Clone)]
pub struct Session {
    pub jwt: String,
    pub user: AuthUser,
}

impl Session {
    /// Looks the token up against the identity endpoint.
    pub async fn resolve(content: &ContentClient, token: BearerToken) -> Result<Self, AppError> {
        let user = content.current_user(&token.0).await?;
        Ok(Self { jwt: token.0, user })
    }
}

/// Session payload handed to the browser after login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub jwt: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub resume: Option<Media>,
    pub user_detail_document_id: Option<String>,
}

impl From<Session> for SessionView {
    fn from(session: Session) -> Self {
        let user = session.user;
        let detail = user.user_detail;
        Self {
            jwt: session.jwt,
            user: SessionUser {
                id: user.id,
                name: user.username,
                email: user.email,
                first_name: detail.as_ref().and_then(|d| d.first_name.clone()),
                last_name: detail.as_ref().and_then(|d| d.last_name.clone()),
                resume: detail.as_ref().and_then(|d| d.resume.clone()),
                user_detail_document_id: detail.map(|d| d.document_id),
            },
        }
    }
}

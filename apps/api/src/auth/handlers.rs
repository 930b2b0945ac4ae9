//! Axum route handlers for login and registration.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;

use crate::auth::session::{Session, SessionView};
use crate::content_client::ContentError;
use crate::errors::AppError;
use crate::forms::{Credentials, Registration, Validate};
use crate::models::user::UserDetailPayload;
use crate::state::AppState;

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: i64,
    pub email: String,
}

/// POST /api/auth/login
///
/// Exchanges credentials for a token, then loads the account's profile so the browser gets
/// names and the stored resume in one response.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<SessionView>, AppError> {
    credentials.validate()?;

    let auth = state
        .content
        .login(credentials.email.trim(), &credentials.password)
        .await
        .map_err(|e| match e {
            ContentError::Api { .. } => {
                AppError::Unauthorized(e.api_message().unwrap_or(LOGIN_FAILED).to_string())
            }
            other => AppError::from(other),
        })?;

    let user = state.content.current_user(&auth.jwt).await?;
    info!("User {} logged in", user.id);

    Ok(Json(SessionView::from(Session {
        jwt: auth.jwt,
        user,
    })))
}

/// POST /api/auth/register
///
/// Creates the account, then its profile record using the new account's token.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(registration): Json<Registration>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    registration.validate()?;

    let email = registration.email.trim();
    let auth = state
        .content
        .register(email, &registration.password)
        .await
        .map_err(|e| match e {
            ContentError::Api { status, .. } if status < 500 => AppError::Validation(
                e.api_message().unwrap_or(REGISTRATION_FAILED).to_string(),
            ),
            other => AppError::from(other),
        })?;

    let profile = UserDetailPayload {
        first_name: registration.first_name.trim().to_string(),
        last_name: registration.last_name.trim().to_string(),
        resume: registration.resume_id.into_iter().collect(),
        user: auth.user.document_id.clone(),
    };
    state.content.create_user_detail(&auth.jwt, &profile).await?;

    info!("Registered user {}", auth.user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: auth.user.id,
            email: auth.user.email,
        }),
    ))
}

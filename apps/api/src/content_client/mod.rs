/// Content Client — the single point of entry for calls to the content/identity backend.
///
/// Jobs, companies, applications, profiles, file storage and login all live behind one
/// Strapi-style REST API. Authenticated calls take an explicit `Session`; nothing here reads
/// ambient user state.
use std::time::Duration;

use bytes::Bytes;
use reqwest::{multipart, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::auth::session::Session;
use crate::models::application::{Application, NewApplication};
use crate::models::company::Company;
use crate::models::job::{Job, JobFilters};
use crate::models::user::{AuthResponse, AuthUser, UserDetail, UserDetailPayload};
use crate::models::{Collection, Media, Single};

pub mod query;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const INVALID_DOCUMENT_ID: &str = "Invalid document id";

/// Document ids are interpolated into request paths, so only `[A-Za-z0-9_-]` is accepted.
pub fn checked_document_id(document_id: &str) -> Result<&str, ContentError> {
    let valid = !document_id.is_empty()
        && document_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(document_id)
    } else {
        Err(ContentError::Api {
            status: 400,
            message: INVALID_DOCUMENT_ID.to_string(),
        })
    }
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Content API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl ContentError {
    /// Message the content API attached to a rejection, if any.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            ContentError::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct DataEnvelope<'a, T> {
    data: &'a T,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

/// A file received from the browser, ready to forward to storage.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Clone)]
pub struct ContentClient {
    client: Client,
    base_url: String,
}

impl ContentClient {
    pub fn new(base_url: String) -> Result<Self, ContentError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match token {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ContentError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ContentError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &query::QueryPairs,
        token: Option<&str>,
    ) -> Result<T, ContentError> {
        debug!("GET {path}");
        let response = self
            .request(Method::GET, path, token)
            .query(query)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ContentError> {
        debug!("{method} {path}");
        let response = self.request(method, path, token).json(body).send().await?;
        Self::read_json(response).await
    }

    // ── Listings ────────────────────────────────────────────────────────────

    pub async fn list_jobs(
        &self,
        page: u32,
        page_size: u32,
        filters: &JobFilters,
    ) -> Result<Collection<Job>, ContentError> {
        self.get("/api/jobs", &query::job_list(page, page_size, filters), None)
            .await
    }

    pub async fn get_job(&self, document_id: &str) -> Result<Job, ContentError> {
        let single: Single<Job> = self
            .get(
                &format!("/api/jobs/{}", checked_document_id(document_id)?),
                &query::job_detail(),
                None,
            )
            .await?;
        Ok(single.data)
    }

    pub async fn get_company(&self, document_id: &str) -> Result<Company, ContentError> {
        let single: Single<Company> = self
            .get(
                &format!("/api/companies/{}", checked_document_id(document_id)?),
                &query::company_detail(),
                None,
            )
            .await?;
        Ok(single.data)
    }

    // ── Identity ────────────────────────────────────────────────────────────

    pub async fn login(&self, identifier: &str, password: &str) -> Result<AuthResponse, ContentError> {
        self.send(
            Method::POST,
            "/api/auth/local",
            &LoginBody {
                identifier,
                password,
            },
            None,
        )
        .await
    }

    /// The token's account with its profile and stored resume populated.
    pub async fn current_user(&self, token: &str) -> Result<AuthUser, ContentError> {
        self.get("/api/users/me", &query::current_user(), Some(token))
            .await
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ContentError> {
        self.send(
            Method::POST,
            "/api/auth/local/register",
            &RegisterBody {
                username: email,
                email,
                password,
            },
            None,
        )
        .await
    }

    pub async fn create_user_detail(
        &self,
        token: &str,
        payload: &UserDetailPayload,
    ) -> Result<UserDetail, ContentError> {
        let single: Single<UserDetail> = self
            .send(
                Method::POST,
                "/api/user-details",
                &DataEnvelope { data: payload },
                Some(token),
            )
            .await?;
        Ok(single.data)
    }

    pub async fn update_user_detail(
        &self,
        session: &Session,
        document_id: &str,
        payload: &UserDetailPayload,
    ) -> Result<UserDetail, ContentError> {
        let single: Single<UserDetail> = self
            .send(
                Method::PUT,
                &format!("/api/user-details/{}", checked_document_id(document_id)?),
                &DataEnvelope { data: payload },
                Some(&session.jwt),
            )
            .await?;
        Ok(single.data)
    }

    // ── Applications ────────────────────────────────────────────────────────

    pub async fn create_application(
        &self,
        session: &Session,
        application: &NewApplication,
    ) -> Result<Application, ContentError> {
        let single: Single<Application> = self
            .send(
                Method::POST,
                "/api/applications",
                &DataEnvelope { data: application },
                Some(&session.jwt),
            )
            .await?;
        Ok(single.data)
    }

    /// The session user's application to a job, if they applied.
    pub async fn application_for_job(
        &self,
        session: &Session,
        job_document_id: &str,
    ) -> Result<Option<Application>, ContentError> {
        let collection: Collection<Application> = self
            .get(
                "/api/applications",
                &query::application_status(job_document_id, session.user.id),
                Some(&session.jwt),
            )
            .await?;
        Ok(collection.data.into_iter().next())
    }

    pub async fn applied_jobs(
        &self,
        session: &Session,
        page: u32,
        page_size: u32,
        status: &str,
    ) -> Result<Collection<Application>, ContentError> {
        self.get(
            "/api/applications",
            &query::applied_jobs(page, page_size, session.user.id, status),
            Some(&session.jwt),
        )
        .await
    }

    // ── Storage ─────────────────────────────────────────────────────────────

    /// Uploads one file and returns the first stored entry. `token` may be absent during sign-up.
    pub async fn upload(&self, token: Option<&str>, file: UploadFile) -> Result<Media, ContentError> {
        let mut part = multipart::Part::bytes(file.bytes.to_vec()).file_name(file.file_name);
        if let Some(content_type) = &file.content_type {
            part = part.mime_str(content_type)?;
        }
        let form = multipart::Form::new().part("files", part);

        debug!("POST /api/upload");
        let response = self
            .request(Method::POST, "/api/upload", token)
            .multipart(form)
            .send()
            .await?;
        let stored: Vec<Media> = Self::read_json(response).await?;

        stored.into_iter().next().ok_or_else(|| ContentError::Api {
            status: 502,
            message: "Upload returned no files".to_string(),
        })
    }
}

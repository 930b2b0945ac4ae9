//! Axum route handlers for job applications, profile updates and resume uploads.
//!
//! Everything here acts on behalf of the bearer's account; the session is resolved per request.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auth::session::{BearerToken, Session};
use crate::content_client::UploadFile;
use crate::errors::AppError;
use crate::forms::{resolve_resume, ApplicationSubmission, UserDetailsUpdate, Validate};
use crate::listings::handlers::{link_context, page_window};
use crate::listings::views::{applied_job, AppliedJobsView};
use crate::models::application::{Application, NewApplication};
use crate::models::user::{UserDetail, UserDetailPayload};
use crate::models::Media;
use crate::state::AppState;

pub const DEFAULT_APPLICATION_STATUS: &str = "Pending";
pub const RESUME_EXTENSIONS: [&str; 3] = [".pdf", ".doc", ".docx"];
pub const UPLOAD_FIELD: &str = "files";
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct ApplicationStatusResponse {
    pub application: Option<Application>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJobsParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Case-insensitive extension check against the accepted resume formats.
pub fn is_resume_file(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    RESUME_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// GET /api/applications/status/:job_document_id
///
/// `application` is null when the user has not applied.
pub async fn handle_application_status(
    State(state): State<AppState>,
    token: BearerToken,
    Path(job_document_id): Path<String>,
) -> Result<Json<ApplicationStatusResponse>, AppError> {
    let session = Session::resolve(&state.content, token).await?;
    let application = state
        .content
        .application_for_job(&session, &job_document_id)
        .await?;
    Ok(Json(ApplicationStatusResponse { application }))
}

/// GET /api/applications/applied
pub async fn handle_applied_jobs(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<AppliedJobsParams>,
) -> Result<Json<AppliedJobsView>, AppError> {
    let session = Session::resolve(&state.content, token).await?;
    let (page, page_size) = page_window(params.page, params.page_size);
    let status = params
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_APPLICATION_STATUS);

    let collection = state
        .content
        .applied_jobs(&session, page, page_size, status)
        .await?;

    let links = link_context(&state);
    let now = Utc::now();
    let pagination = collection.meta.pagination;
    Ok(Json(AppliedJobsView {
        applications: collection
            .data
            .iter()
            .map(|application| applied_job(application, &links, now))
            .collect(),
        next_page: pagination.next_page(),
        pagination,
    }))
}

/// POST /api/applications
///
/// Form errors are reported before the token is checked against the identity endpoint.
pub async fn handle_submit_application(
    State(state): State<AppState>,
    token: BearerToken,
    Json(submission): Json<ApplicationSubmission>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    submission.validate()?;
    let session = Session::resolve(&state.content, token).await?;

    let application = NewApplication {
        resume: resolve_resume(submission.resume_id, &session.user),
        interest_reason: submission.interest_reason.trim().to_string(),
        skills: submission.skills.trim().to_string(),
        job: submission.job.trim().to_string(),
        user: session.user.id,
    };
    let created = state
        .content
        .create_application(&session, &application)
        .await?;

    info!(
        "User {} applied to job {} (application {})",
        session.user.id, application.job, created.document_id
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/user-details/:document_id
pub async fn handle_update_user_details(
    State(state): State<AppState>,
    token: BearerToken,
    Path(document_id): Path<String>,
    Json(update): Json<UserDetailsUpdate>,
) -> Result<Json<UserDetail>, AppError> {
    update.validate()?;
    let session = Session::resolve(&state.content, token).await?;

    let payload = UserDetailPayload {
        first_name: update.first_name.trim().to_string(),
        last_name: update.last_name.trim().to_string(),
        resume: resolve_resume(update.resume_id, &session.user)
            .into_iter()
            .collect(),
        user: None,
    };
    let detail = state
        .content
        .update_user_detail(&session, &document_id, &payload)
        .await?;
    Ok(Json(detail))
}

/// POST /api/upload
///
/// Accepts a single resume under the `files` field. The token is optional because sign-up uploads
/// the resume before the account exists.
pub async fn handle_upload(
    State(state): State<AppState>,
    token: Option<BearerToken>,
    mut multipart: Multipart,
) -> Result<Json<Media>, AppError> {
    let mut upload: Option<UploadFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("Uploaded file has no name".to_string()))?;
        if !is_resume_file(&file_name) {
            return Err(AppError::Validation(
                "Only .pdf, .doc and .docx files are accepted".to_string(),
            ));
        }
        let content_type = field.content_type().map(str::to_string);
        let bytes: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        upload = Some(UploadFile {
            file_name,
            content_type,
            bytes,
        });
        break;
    }

    let upload = upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    debug!("Uploading {} ({} bytes)", upload.file_name, upload.bytes.len());

    let stored = state
        .content
        .upload(token.as_ref().map(|t| t.0.as_str()), upload)
        .await?;
    Ok(Json(stored))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::{to_bytes, Body},
        extract::Query,
        http::{HeaderMap, Request},
        routing::{get, post, put},
        Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::handlers::tests::StubCompletion;
    use crate::content_client::tests::{job_json, serve};
    use crate::routes::build_router;
    use crate::state::test_support::state_with;

    const TOKEN: &str = "jwt-123";

    fn me() -> Value {
        json!({
            "id": 42,
            "documentId": "u42",
            "username": "ada@example.com",
            "email": "ada@example.com",
            "user_detail": {
                "id": 3,
                "documentId": "d3",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "resume": {"id": 77, "url": "/uploads/cv.pdf"}
            }
        })
    }

    fn authorized(headers: &HeaderMap) -> bool {
        let expected = format!("Bearer {TOKEN}");
        headers.get("authorization").and_then(|v| v.to_str().ok()) == Some(expected.as_str())
    }

    /// Content API with an identity endpoint plus `extra` routes.
    fn content_with(extra: Router) -> Router {
        Router::new()
            .route(
                "/api/users/me",
                get(|headers: HeaderMap| async move {
                    if authorized(&headers) {
                        (StatusCode::OK, Json(me()))
                    } else {
                        (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({"error": {"status": 401, "message": "Invalid token"}})),
                        )
                    }
                }),
            )
            .merge(extra)
    }

    async fn app_against(content: Router) -> Router {
        let url = serve(content).await;
        build_router(state_with(Arc::new(StubCompletion::text("unused")), &url))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", format!("Bearer {TOKEN}"))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(file_name: &str, token: Option<&str>) -> Request<Body> {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"files\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             %PDF-1.4 resume\r\n\
             --{boundary}--\r\n"
        );
        let mut builder = Request::post("/api/upload").header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        );
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        builder.body(Body::from(body)).unwrap()
    }

    fn application_json(document_id: &str) -> Value {
        json!({
            "id": 11,
            "documentId": document_id,
            "applicationStatus": "Pending",
            "interestReason": "Love the mission",
            "skills": "Rust",
            "createdAt": "2025-02-01T00:00:00.000Z",
            "job": job_json("j1", "Rust Dev")
        })
    }

    #[test]
    fn test_resume_extensions() {
        assert!(is_resume_file("cv.pdf"));
        assert!(is_resume_file("CV.DOCX"));
        assert!(is_resume_file("resume.doc"));
        assert!(!is_resume_file("photo.png"));
        assert!(!is_resume_file("pdf"));
    }

    #[tokio::test]
    async fn test_submit_uses_stored_resume_and_session_user() {
        let captured: Arc<Mutex<Option<Value>>> = Arc::default();
        let sink = captured.clone();
        let content = content_with(Router::new().route(
            "/api/applications",
            post(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().unwrap() = Some(body);
                    Json(json!({ "data": application_json("app1") }))
                }
            }),
        ));
        let router = app_against(content).await;

        let (status, body) = send(
            router,
            json_request(
                "POST",
                "/api/applications",
                json!({"job": "j1", "interestReason": " Love the mission ", "skills": "Rust"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["documentId"], "app1");
        let sent = captured.lock().unwrap().clone().unwrap();
        assert_eq!(
            sent,
            json!({"data": {
                "resume": 77,
                "interestReason": "Love the mission",
                "skills": "Rust",
                "job": "j1",
                "user": 42
            }})
        );
    }

    #[tokio::test]
    async fn test_invalid_submission_rejected_before_content_calls() {
        // No routes at all: any outbound call would fail with a 404 from the fake.
        let router = app_against(Router::new()).await;
        let (status, body) = send(
            router,
            json_request(
                "POST",
                "/api/applications",
                json!({"job": "j1", "interestReason": "x".repeat(201), "skills": ""}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let fields: Vec<&str> = body["error"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["interestReason", "skills"]);
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let router = app_against(content_with(Router::new())).await;
        let request = Request::get("/api/applications/status/j1")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Authentication required");
    }

    #[tokio::test]
    async fn test_rejected_token_is_401() {
        let router = app_against(content_with(Router::new())).await;
        let request = Request::get("/api/applications/status/j1")
            .header("authorization", "Bearer stale")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Invalid token");
    }

    #[tokio::test]
    async fn test_status_returns_null_when_not_applied() {
        let content = content_with(Router::new().route(
            "/api/applications",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["filters[user][id][$eq]"], "42");
                assert_eq!(params["filters[job][documentId][$eq]"], "j1");
                Json(json!({
                    "data": [],
                    "meta": {"pagination": {"page": 1, "pageSize": 25, "pageCount": 0, "total": 0}}
                }))
            }),
        ));
        let router = app_against(content).await;
        let request = Request::get("/api/applications/status/j1")
            .header("authorization", format!("Bearer {TOKEN}"))
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"application": null}));
    }

    #[tokio::test]
    async fn test_applied_jobs_defaults_to_pending() {
        let content = content_with(Router::new().route(
            "/api/applications",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let status = params["filters[applicationStatus][$eq]"].clone();
                Json(json!({
                    "data": [application_json(&format!("app-{status}"))],
                    "meta": {"pagination": {"page": 1, "pageSize": 2, "pageCount": 2, "total": 3}}
                }))
            }),
        ));
        let router = app_against(content).await;
        let request = Request::get("/api/applications/applied")
            .header("authorization", format!("Bearer {TOKEN}"))
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applications"][0]["documentId"], "app-Pending");
        assert_eq!(body["applications"][0]["job"]["jobTitle"], "Rust Dev");
        assert_eq!(body["nextPage"], 2);
    }

    #[tokio::test]
    async fn test_update_user_details() {
        let captured: Arc<Mutex<Option<Value>>> = Arc::default();
        let sink = captured.clone();
        let content = content_with(Router::new().route(
            "/api/user-details/:id",
            put(move |Path(id): Path<String>, Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().unwrap() = Some(body);
                    Json(json!({"data": {
                        "id": 3, "documentId": id, "firstName": "Ada", "lastName": "Byron",
                        "resume": {"id": 90, "url": "/uploads/new.pdf"}
                    }}))
                }
            }),
        ));
        let router = app_against(content).await;

        let (status, body) = send(
            router,
            json_request(
                "PUT",
                "/api/user-details/d3",
                json!({"firstName": "Ada", "lastName": "Byron", "resumeId": 90}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["documentId"], "d3");
        assert_eq!(
            captured.lock().unwrap().clone().unwrap(),
            json!({"data": {"firstName": "Ada", "lastName": "Byron", "resume": [90]}})
        );
    }

    #[tokio::test]
    async fn test_upload_forwards_resume() {
        let content = Router::new().route(
            "/api/upload",
            post(|mut multipart: Multipart| async move {
                let field = multipart.next_field().await.unwrap().unwrap();
                assert_eq!(field.name(), Some("files"));
                let name = field.file_name().unwrap().to_string();
                Json(json!([{"id": 5, "documentId": "f5", "name": name, "url": "/uploads/cv.pdf"}]))
            }),
        );
        let router = app_against(content).await;

        let (status, body) = send(router, multipart_request("cv.pdf", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 5);
        assert_eq!(body["name"], "cv.pdf");
    }

    #[tokio::test]
    async fn test_upload_rejects_other_extensions() {
        let router = app_against(Router::new()).await;
        let (status, body) = send(router, multipart_request("me.png", Some(TOKEN))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Only .pdf, .doc and .docx files are accepted"
        );
    }
}

pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::applications::handlers as applications;
use crate::auth::handlers as auth;
use crate::listings::handlers as listings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Qualification analysis
        .route("/api/analyze", post(analysis::handle_analyze))
        .route("/api/analyze/render", post(analysis::handle_render))
        // Job board
        .route("/api/jobs", get(listings::handle_list_jobs))
        .route("/api/jobs/:document_id", get(listings::handle_get_job))
        .route(
            "/api/companies/:document_id",
            get(listings::handle_get_company),
        )
        // Accounts
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/register", post(auth::handle_register))
        // Applications & profile
        .route(
            "/api/applications",
            post(applications::handle_submit_application),
        )
        .route(
            "/api/applications/status/:job_document_id",
            get(applications::handle_application_status),
        )
        .route(
            "/api/applications/applied",
            get(applications::handle_applied_jobs),
        )
        .route(
            "/api/user-details/:document_id",
            put(applications::handle_update_user_details),
        )
        .route(
            "/api/upload",
            post(applications::handle_upload)
                .layer(DefaultBodyLimit::max(applications::MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}

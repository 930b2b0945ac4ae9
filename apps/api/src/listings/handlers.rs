//! Axum route handlers for the public job board: listing, job detail, company overview.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::listings::views::{
    company_overview, job_card, job_detail, CompanyOverview, JobDetailView, JobListView,
    LinkContext,
};
use crate::models::job::JobFilters;
use crate::state::AppState;

pub const DEFAULT_PAGE_SIZE: u32 = 2;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub workplace: Option<String>,
    #[serde(default)]
    pub seniority: Option<String>,
}

impl JobListParams {
    pub fn filters(&self) -> JobFilters {
        JobFilters {
            search: self.search.clone(),
            job_type: self.job_type.clone(),
            workplace: self.workplace.clone(),
            seniority: self.seniority.clone(),
        }
    }
}

/// Page numbers start at 1; sizes are clamped so a client cannot ask for the whole table.
pub fn page_window(page: Option<u32>, page_size: Option<u32>) -> (u32, u32) {
    (
        page.unwrap_or(1).max(1),
        page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE),
    )
}

pub(crate) fn link_context(state: &AppState) -> LinkContext {
    LinkContext {
        content_base_url: state.content.base_url().to_string(),
        placeholder_logo_url: state.config.placeholder_logo_url.clone(),
    }
}

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListParams>,
) -> Result<Json<JobListView>, AppError> {
    let (page, page_size) = page_window(params.page, params.page_size);
    let filters = params.filters();
    debug!("Listing jobs page {page} size {page_size} filters {filters:?}");

    let collection = state.content.list_jobs(page, page_size, &filters).await?;

    let links = link_context(&state);
    let now = Utc::now();
    let pagination = collection.meta.pagination;
    Ok(Json(JobListView {
        jobs: collection
            .data
            .iter()
            .map(|job| job_card(job, &links, now))
            .collect(),
        next_page: pagination.next_page(),
        pagination,
    }))
}

/// GET /api/jobs/:document_id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<JobDetailView>, AppError> {
    let job = state.content.get_job(&document_id).await?;
    Ok(Json(job_detail(&job, &link_context(&state), Utc::now())))
}

/// GET /api/companies/:document_id
pub async fn handle_get_company(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<CompanyOverview>, AppError> {
    let company = state.content.get_company(&document_id).await?;
    Ok(Json(company_overview(
        &company,
        &link_context(&state),
        Utc::now(),
    )))
}

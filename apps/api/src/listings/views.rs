//! Turns content-API entries into the card/detail/overview payloads the job
//! board pages render.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::request_builder::{build_job_details, JobSummary};
use crate::models::application::Application;
use crate::models::company::Company;
use crate::models::job::Job;
use crate::models::{Media, Pagination};

/// What view builders need to turn relative media paths into absolute URLs.
#[derive(Debug, Clone)]
pub struct LinkContext {
    pub content_base_url: String,
    pub placeholder_logo_url: String,
}

impl LinkContext {
    pub fn logo_url(&self, logo: Option<&Media>) -> String {
        match logo {
            Some(media) if media.url.starts_with("http://") || media.url.starts_with("https://") => {
                media.url.clone()
            }
            Some(media) => format!("{}{}", self.content_base_url, media.url),
            None => self.placeholder_logo_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCard {
    pub id: i64,
    pub document_id: String,
    pub job_title: String,
    pub company_name: Option<String>,
    pub company_logo_url: String,
    pub salary_range: String,
    pub is_remote: bool,
    pub location: String,
    pub job_type: String,
    pub tags: Vec<String>,
    pub time_posted: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListView {
    pub jobs: Vec<JobCard>,
    pub pagination: Pagination,
    pub next_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetailView {
    #[serde(flatten)]
    pub card: JobCard,
    pub company_document_id: Option<String>,
    pub company_website: Option<String>,
    pub seniority: String,
    pub benefits: Vec<String>,
    pub about_role: Vec<String>,
    pub what_we_do: Vec<String>,
    pub ways_to_work: Vec<String>,
    pub published_date: String,
    /// Prompt block for the qualification analyzer, ready to post as `jobDetails`.
    pub analyzer_job_details: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyOverview {
    pub id: i64,
    pub document_id: String,
    pub company_name: String,
    pub company_logo_url: String,
    pub company_website: Option<String>,
    pub total_jobs: usize,
    pub about: Vec<String>,
    pub jobs: Vec<JobCard>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJob {
    pub document_id: String,
    pub application_status: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub job: Option<JobCard>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJobsView {
    pub applications: Vec<AppliedJob>,
    pub pagination: Pagination,
    pub next_page: Option<u32>,
}

/// Card for the listing pages. Tags carry the seniority.
pub fn job_card(job: &Job, links: &LinkContext, now: DateTime<Utc>) -> JobCard {
    let company = job.company.as_ref();
    JobCard {
        id: job.id,
        document_id: job.document_id.clone(),
        job_title: job.job_title.clone(),
        company_name: company.map(|c| c.company_name.clone()),
        company_logo_url: links.logo_url(company.and_then(|c| c.logo.as_ref())),
        salary_range: job.salary_range.clone(),
        is_remote: job.is_remote(),
        location: job.workplace.clone(),
        job_type: job.job_type.clone(),
        tags: vec![job.seniority.clone()],
        time_posted: time_ago(job.created_at, now),
    }
}

pub fn job_detail(job: &Job, links: &LinkContext, now: DateTime<Utc>) -> JobDetailView {
    let company = job.company.as_ref();
    JobDetailView {
        card: job_card(job, links, now),
        company_document_id: company.map(|c| c.document_id.clone()),
        company_website: company.and_then(|c| c.company_website.clone()),
        seniority: job.seniority.clone(),
        benefits: job.benefit_texts(),
        about_role: job.about_role_texts(),
        what_we_do: job.what_we_do_texts(),
        ways_to_work: job.ways_to_work_texts(),
        published_date: published_date(job.created_at),
        analyzer_job_details: build_job_details(&JobSummary::from(job)),
    }
}

/// Company page. Its job entries are not populated with a company, so cards borrow this one's
/// name and logo; remote detection here ignores case.
pub fn company_overview(company: &Company, links: &LinkContext, now: DateTime<Utc>) -> CompanyOverview {
    let logo_url = links.logo_url(company.logo.as_ref());
    let jobs: Vec<JobCard> = company
        .jobs()
        .iter()
        .map(|job| JobCard {
            company_name: Some(company.company_name.clone()),
            company_logo_url: logo_url.clone(),
            is_remote: job.workplace.eq_ignore_ascii_case("remote"),
            tags: vec![format!("{} - {}", job.workplace, job.seniority)],
            ..job_card(job, links, now)
        })
        .collect();

    CompanyOverview {
        id: company.id,
        document_id: company.document_id.clone(),
        company_name: company.company_name.clone(),
        company_logo_url: logo_url,
        company_website: company.company_website.clone(),
        total_jobs: jobs.len(),
        about: company.about_texts(),
        jobs,
    }
}

pub fn applied_job(application: &Application, links: &LinkContext, now: DateTime<Utc>) -> AppliedJob {
    AppliedJob {
        document_id: application.document_id.clone(),
        application_status: application.application_status.clone(),
        applied_at: application.created_at,
        job: application.job.as_ref().map(|job| job_card(job, links, now)),
    }
}

/// `Mar 1, 2025` style date.
pub fn published_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// Relative "3 days ago" phrasing. Each unit is rounded from the one below it, and a unit is
/// used until the next threshold is crossed (45s, 45m, 22h, 26d, 11 months).
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = ((now - then).num_milliseconds().max(0) as f64 / 1000.0).round();
    let minutes = (seconds / 60.0).round();
    let hours = (minutes / 60.0).round();
    let days = (hours / 24.0).round();
    let months = (days / 30.4).round();
    let years = (days / 365.0).round();

    let phrase = if seconds < 45.0 {
        "a few seconds".to_string()
    } else if minutes <= 1.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{minutes} minutes")
    } else if hours <= 1.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{hours} hours")
    } else if days <= 1.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{days} days")
    } else if months <= 1.0 {
        "a month".to_string()
    } else if months < 11.0 {
        format!("{months} months")
    } else if years <= 1.0 {
        "a year".to_string()
    } else {
        format!("{years} years")
    };
    format!("{phrase} ago")
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{texts, Media, TextBlock};

/// Company as embedded in a job entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRef {
    pub id: i64,
    pub document_id: String,
    pub company_name: String,
    #[serde(default)]
    pub company_website: Option<String>,
    #[serde(default)]
    pub logo: Option<Media>,
}

/// A job posting. Relations are `None` unless the query populated them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub document_id: String,
    pub job_title: String,
    #[serde(default)]
    pub salary_range: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub workplace: String,
    #[serde(default)]
    pub seniority: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub benefits: Option<Vec<TextBlock>>,
    #[serde(default)]
    pub about_role: Option<Vec<TextBlock>>,
    #[serde(default)]
    pub what_we_do: Option<Vec<TextBlock>>,
    #[serde(default)]
    pub ways_to_work: Option<Vec<TextBlock>>,
    #[serde(default)]
    pub company: Option<CompanyRef>,
}

impl Job {
    pub fn is_remote(&self) -> bool {
        self.workplace == "Remote"
    }

    pub fn benefit_texts(&self) -> Vec<String> {
        texts(&self.benefits)
    }

    pub fn about_role_texts(&self) -> Vec<String> {
        texts(&self.about_role)
    }

    pub fn what_we_do_texts(&self) -> Vec<String> {
        texts(&self.what_we_do)
    }

    pub fn ways_to_work_texts(&self) -> Vec<String> {
        texts(&self.ways_to_work)
    }
}

/// Listing filters. Empty values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilters {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub workplace: Option<String>,
    #[serde(default)]
    pub seniority: Option<String>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::job::Job;
use super::Media;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub document_id: String,
    #[serde(default)]
    pub application_status: Option<String>,
    #[serde(default)]
    pub interest_reason: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub job: Option<Job>,
    #[serde(default)]
    pub resume: Option<Media>,
}

/// Body of `POST /api/applications` inside the `data` envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub resume: Option<i64>,
    pub interest_reason: String,
    pub skills: String,
    /// Job document id.
    pub job: String,
    /// User id.
    pub user: i64,
}

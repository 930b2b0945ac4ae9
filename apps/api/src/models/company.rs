use serde::{Deserialize, Serialize};

use super::job::Job;
use super::{texts, Media, TextBlock};

/// A company with its about paragraphs and (unpopulated) jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    pub document_id: String,
    pub company_name: String,
    #[serde(default)]
    pub company_website: Option<String>,
    #[serde(default)]
    pub logo: Option<Media>,
    #[serde(default)]
    pub about: Option<Vec<TextBlock>>,
    #[serde(default)]
    pub jobs: Option<Vec<Job>>,
}

impl Company {
    pub fn about_texts(&self) -> Vec<String> {
        texts(&self.about)
    }

    pub fn jobs(&self) -> &[Job] {
        self.jobs.as_deref().unwrap_or_default()
    }
}

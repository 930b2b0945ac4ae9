//! Flattens a job's attributes into the plain-text block sent as `jobDetails`.

use serde::{Deserialize, Serialize};

use crate::models::job::Job;

/// Job attributes the analysis prompt is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub title: String,
    pub is_remote: bool,
    pub job_type: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub about_role: Vec<String>,
    #[serde(default)]
    pub what_we_do: Vec<String>,
    #[serde(default)]
    pub ways_to_work: Vec<String>,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            title: job.job_title.clone(),
            is_remote: job.is_remote(),
            job_type: job.job_type.clone(),
            benefits: job.benefit_texts(),
            about_role: job.about_role_texts(),
            what_we_do: job.what_we_do_texts(),
            ways_to_work: job.ways_to_work_texts(),
        }
    }
}

/// Renders the summary as the prompt block, trimmed. Empty lists leave their section body blank.
pub fn build_job_details(job: &JobSummary) -> String {
    format!(
        "\nJob Title: {title}\n\n\
         Job Attributes:\n\
         - Remote: {remote}\n\
         - Type: {job_type}\n\n\
         Benefits:\n{benefits}\n\n\
         About the Role:\n{about_role}\n\n\
         What We Do:\n{what_we_do}\n\n\
         Ways to Work:\n{ways_to_work}\n",
        title = job.title,
        remote = if job.is_remote { "Yes" } else { "No" },
        job_type = job.job_type,
        benefits = bullet_lines(&job.benefits),
        about_role = bullet_lines(&job.about_role),
        what_we_do = bullet_lines(&job.what_we_do),
        ways_to_work = bullet_lines(&job.ways_to_work),
    )
    .trim()
    .to_string()
}

fn bullet_lines(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

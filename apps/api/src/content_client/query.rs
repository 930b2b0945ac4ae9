//! Query-string builders for the content API's bracketed filter/populate/pagination syntax.

use crate::models::job::JobFilters;

pub type QueryPairs = Vec<(String, String)>;

fn pair(key: &str, value: impl Into<String>) -> (String, String) {
    (key.to_string(), value.into())
}

/// Relations every job view needs.
fn job_populate() -> QueryPairs {
    vec![
        pair("populate[benefits]", "true"),
        pair("populate[aboutRole]", "true"),
        pair("populate[whatWeDo]", "true"),
        pair("populate[waysToWork]", "true"),
        pair("populate[company][populate]", "logo"),
    ]
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn job_list(page: u32, page_size: u32, filters: &JobFilters) -> QueryPairs {
    let mut query = vec![
        pair("pagination[page]", page.to_string()),
        pair("pagination[pageSize]", page_size.to_string()),
    ];
    query.extend(job_populate());

    if let Some(search) = non_empty(&filters.search) {
        query.push(pair("filters[jobTitle][$containsi]", search));
    }
    if let Some(job_type) = non_empty(&filters.job_type) {
        query.push(pair("filters[jobType][$eq]", job_type));
    }
    if let Some(workplace) = non_empty(&filters.workplace) {
        query.push(pair("filters[workplace][$eq]", workplace));
    }
    if let Some(seniority) = non_empty(&filters.seniority) {
        query.push(pair("filters[seniority][$eq]", seniority));
    }
    query
}

pub fn job_detail() -> QueryPairs {
    job_populate()
}

pub fn company_detail() -> QueryPairs {
    vec![pair("populate", "*")]
}

pub fn current_user() -> QueryPairs {
    vec![pair("populate[user_detail][populate][resume]", "*")]
}

pub fn application_status(job_document_id: &str, user_id: i64) -> QueryPairs {
    vec![
        pair("filters[job][documentId][$eq]", job_document_id),
        pair("filters[user][id][$eq]", user_id.to_string()),
    ]
}

pub fn applied_jobs(page: u32, page_size: u32, user_id: i64, status: &str) -> QueryPairs {
    vec![
        pair("populate[job][populate][company][populate][logo][fields][]", "url"),
        pair("pagination[page]", page.to_string()),
        pair("pagination[pageSize]", page_size.to_string()),
        pair("filters[user][id][$eq]", user_id.to_string()),
        pair("filters[applicationStatus][$eq]", status),
    ]
}

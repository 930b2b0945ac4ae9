// Prompt constants for the qualification analysis.

/// System instruction. The renderer keys its categories off these four headings.
pub const ANALYSIS_SYSTEM: &str = "You are a career advisor. \
    Analyze if the candidate is qualified for the job based on the provided job details and their skills. \
    Structure your response in markdown with: \
    ## Overall Qualification (yes/no/maybe with explanation), \
    ## Strong Points (bullet list), \
    ## Weak Points (bullet list), \
    ## Recommendations (bullet list).";

/// User message carrying both submitted strings verbatim, separated by a blank line.
pub fn analysis_user_message(job_details: &str, skills: &str) -> String {
    format!("Job details: {job_details}\n\nCandidate skills: {skills}")
}

/// Returned in place of an empty completion.
pub const NO_ANALYSIS_FALLBACK: &str = "No analysis generated";

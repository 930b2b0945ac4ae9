// Qualification analysis: job details + candidate skills → completion → markdown sections.
// Completion calls go through llm_client::CompletionService; nothing here persists.

pub mod handlers;
pub mod prompts;
pub mod renderer;
pub mod request_builder;

/// LLM Client — the single point of entry for chat-completion calls in Hireloom.
///
/// ARCHITECTURAL RULE: No other module may call the completion API directly.
/// Handlers depend on the `CompletionService` trait so tests can swap in a stub.
///
/// Speaks the OpenAI-compatible `/chat/completions` wire format (OpenRouter by default).
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// One turn of a chat conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: Option<u32>,
    #[serde(default)]
    completion_tokens: Option<u32>,
}

impl ChatResponse {
    /// Content of the first choice, if the service produced any.
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|text| !text.is_empty())
    }
}

/// A chat-completion backend. `Ok(None)` means the call succeeded but returned no content.
///
/// Carried in `AppState` as `Arc<dyn CompletionService>`.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, LlmError>;
}

/// HTTP client for an OpenAI-compatible chat-completion endpoint.
/// One attempt per call; retries are the caller's decision.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            base_url,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;

        if let Some(usage) = &chat.usage {
            debug!(
                "Completion succeeded: prompt_tokens={:?}, completion_tokens={:?}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    /// Serves `router` on an ephemeral localhost port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(base_url: String) -> LlmClient {
        LlmClient::new("sk-test".to_string(), base_url, "test-model".to_string()).unwrap()
    }

    #[test]
    fn test_into_text_takes_first_choice() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ]
        }))
        .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("first"));
    }

    #[test]
    fn test_into_text_tolerates_partial_usage() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "## Strong Points\n- A"}}],
            "usage": {"prompt_tokens": 10}
        }))
        .unwrap();
        let usage = response.usage.as_ref().unwrap();
        assert_eq!(usage.prompt_tokens, Some(10));
        assert_eq!(usage.completion_tokens, None);
        assert_eq!(response.into_text().as_deref(), Some("## Strong Points\n- A"));
    }

    #[test]
    fn test_into_text_none_for_null_or_empty_content() {
        let null_content: ChatResponse =
            serde_json::from_value(json!({"choices": [{"message": {"content": null}}]})).unwrap();
        assert!(null_content.into_text().is_none());

        let empty_content: ChatResponse =
            serde_json::from_value(json!({"choices": [{"message": {"content": ""}}]})).unwrap();
        assert!(empty_content.into_text().is_none());

        let no_choices: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(no_choices.into_text().is_none());
    }

    #[tokio::test]
    async fn test_complete_sends_model_messages_and_bearer() {
        let router = Router::new().route(
            "/chat/completions",
            post(
                |headers: axum::http::HeaderMap, Json(body): Json<Value>| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Json(json!({
                        "choices": [{"message": {"content": format!(
                            "{}|{}|{}|{}",
                            auth,
                            body["model"].as_str().unwrap_or_default(),
                            body["messages"].as_array().map(|m| m.len()).unwrap_or(0),
                            body["messages"][1]["content"].as_str().unwrap_or_default()
                        )}}],
                        "usage": {"prompt_tokens": 10, "completion_tokens": 5}
                    }))
                },
            ),
        );
        let client = client_for(serve(router).await);

        let text = client
            .complete(&[ChatMessage::system("sys"), ChatMessage::user("hello")])
            .await
            .unwrap();

        assert_eq!(text.as_deref(), Some("Bearer sk-test|test-model|2|hello"));
    }

    #[tokio::test]
    async fn test_complete_maps_non_success_status_to_api_error() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let client = client_for(serve(router).await);

        let err = client.complete(&[ChatMessage::user("x")]).await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "slow down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_complete_malformed_body_is_http_error() {
        let router = Router::new().route("/chat/completions", post(|| async { "not json" }));
        let client = client_for(serve(router).await);

        let err = client.complete(&[ChatMessage::user("x")]).await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }
}

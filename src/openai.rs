use crate::error::CompletionError;
use crate::prompt::REPORT_PROMPT;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Sampling temperature for review requests. Low on purpose: reviews should
/// be stable across invocations.
const TEMPERATURE: f64 = 0.2;

pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    /// Building the underlying HTTP client doubles as the capability check:
    /// it fails when the TLS backend cannot initialize, and the caller turns
    /// that into the dedicated "client unavailable" error path.
    pub fn new(api_key: String, base_url: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Issue exactly one chat-completion request and return the assistant
    /// message body. The request pins `response_format` to a JSON object;
    /// an empty body is mapped to `"{}"` so downstream parsing sees an
    /// empty review rather than a failure.
    pub async fn complete(
        &self,
        model: &str,
        user_message: &str,
    ) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: REPORT_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(CompletionError::Request)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status, body });
        }

        let parsed: ChatResponse = response.json().await.map_err(CompletionError::Request)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyChoices)?
            .message
            .content
            .filter(|c| !c.is_empty());

        Ok(content.unwrap_or_else(|| "{}".to_string()))
    }
}

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;
use tracing::warn;

use crate::ai::error::AiError;

pub const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: String,
}

impl Message {
    pub fn user(content: String) -> Self {
        Self {
            role: "user",
            content,
        }
    }

    pub fn system(content: String) -> Self {
        Self {
            role: "system",
            content,
        }
    }
}

/// `response_format` request field for backends that support
/// schema-constrained (structured) output.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub json_schema: JsonSchemaFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub strict: bool,
    pub schema: serde_json::Value,
}

impl ResponseFormat {
    pub fn json_schema(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            kind: "json_schema",
            json_schema: JsonSchemaFormat {
                name: name.into(),
                strict: true,
                schema,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: String,
    pub model: String,
}

/// Port for the text-generation backend so handlers and tests can swap in
/// fakes, in the same way storage is injected elsewhere in the app.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn chat(
        &self,
        messages: &[Message],
        response_format: Option<&ResponseFormat>,
    ) -> Result<ChatResponse, AiError>;

    fn supports_structured_output(&self) -> bool;
}

/// Stand-in used when no API credential is configured. Fails with a
/// non-transient error so callers drop straight into the fallback.
pub struct UnconfiguredClient;

#[async_trait]
impl ChatClient for UnconfiguredClient {
    async fn chat(
        &self,
        _messages: &[Message],
        _response_format: Option<&ResponseFormat>,
    ) -> Result<ChatResponse, AiError> {
        Err(AiError::Authentication("API key is required".into()))
    }

    fn supports_structured_output(&self) -> bool {
        false
    }
}

/// Retry wrapper over `ChatClient::chat`. Transient failures are retried with
/// exponential backoff plus jitter; non-transient failures abort immediately.
pub async fn chat_with_retry(
    client: &dyn ChatClient,
    messages: &[Message],
    response_format: Option<&ResponseFormat>,
) -> Result<ChatResponse, AiError> {
    let mut last: Option<AiError> = None;

    for attempt in 0..MAX_ATTEMPTS {
        if attempt > 0 {
            let jitter = rand::thread_rng().gen_range(0..1000u64);
            let delay = Duration::from_millis(1000 * (1 << (attempt - 1)) + jitter);
            tokio::time::sleep(delay).await;
        }

        match client.chat(messages, response_format).await {
            Ok(response) => return Ok(response),
            Err(e) if !e.is_transient() => return Err(e),
            Err(e) => {
                warn!(error = %e, attempt, "chat attempt failed");
                last = Some(e);
            }
        }
    }

    Err(last.unwrap_or_else(|| AiError::Network("retry attempts exhausted".into())))
}

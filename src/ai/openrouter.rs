use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::ai::client::{ChatClient, ChatResponse, Message, ResponseFormat};
use crate::ai::error::AiError;
use crate::config::OpenRouterConfig;

/// Models known to honor a `json_schema` response format.
const STRUCTURED_OUTPUT_MODELS: &[&str] = &[
    "anthropic/claude-3-opus-20240229",
    "anthropic/claude-3-sonnet-20240229",
    "anthropic/claude-3-haiku-20240307",
    "openai/gpt-4-turbo",
    "openai/gpt-4",
    "openai/gpt-3.5-turbo",
    "google/gemini-pro",
    "google/gemini-1.5-pro",
    "meta-llama/llama-3-70b-instruct",
    "meta-llama/llama-3-8b-instruct",
    "mistral/mistral-large",
    "mistral/mistral-medium",
    "mistral/mistral-small",
];

pub struct OpenRouterClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenRouterClient {
    pub fn new(config: &OpenRouterConfig) -> Result<Self, AiError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AiError::Authentication("API key is required".into()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key,
            model: config.model.clone(),
        })
    }

    fn classify_status(status: reqwest::StatusCode, data: Value) -> AiError {
        let detail = data["error"]["message"]
            .as_str()
            .unwrap_or("no error detail")
            .to_string();

        match status.as_u16() {
            401 => AiError::Authentication("invalid API key".into()),
            429 => AiError::RateLimit(detail),
            404 => AiError::Model("model does not exist or is not available".into()),
            400 => AiError::Validation(detail),
            403 => {
                if data["error"]["code"] == "content_policy_violation" {
                    AiError::ContentPolicy(detail)
                } else {
                    AiError::Authentication("insufficient permissions".into())
                }
            }
            code => AiError::Network(format!("API error ({code}): {detail}")),
        }
    }
}

#[async_trait]
impl ChatClient for OpenRouterClient {
    async fn chat(
        &self,
        messages: &[Message],
        response_format: Option<&ResponseFormat>,
    ) -> Result<ChatResponse, AiError> {
        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": 0.7,
            "max_tokens": 1000,
            "top_p": 0.9,
        });
        if let Some(format) = response_format {
            body["response_format"] = serde_json::to_value(format)
                .map_err(|e| AiError::Validation(format!("response format: {e}")))?;
        }

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Network("request timed out".into())
                } else {
                    AiError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let data: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(Self::classify_status(status, data));
        }

        let content = data["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AiError::Model("no response received from the model".into()))?
            .to_string();
        let model = data["model"].as_str().unwrap_or_default().to_string();

        Ok(ChatResponse { content, model })
    }

    fn supports_structured_output(&self) -> bool {
        STRUCTURED_OUTPUT_MODELS.contains(&self.model.as_str())
    }
}

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{AiError, ProviderConfig, Vendor};

use super::VendorAdapter;
use super::response_parsing::{map_http_error, map_transport_error, non_blank};

const VENDOR_NAME: &str = "OpenAI";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u16 = 1000;

pub struct OpenAiAdapter {
    api_base_url: String,
    client: Client,
}

impl OpenAiAdapter {
    pub fn new() -> Result<Self, AiError> {
        Self::with_config(DEFAULT_BASE_URL, None)
    }

    pub fn with_config(
        api_base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, AiError> {
        let api_base_url = api_base_url.into();
        if api_base_url.trim().is_empty() {
            return Err(AiError::configuration(
                "OpenAI API base URL must not be empty",
            ));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| {
            AiError::internal(format!("failed to create OpenAI HTTP client: {err}"))
        })?;

        Ok(Self {
            api_base_url,
            client,
        })
    }

    fn endpoint_url(&self) -> String {
        build_v1_url(&self.api_base_url, "chat/completions")
    }

    fn build_request_payload(
        &self,
        prompt: &str,
        config: &ProviderConfig,
    ) -> ChatCompletionsRequest {
        ChatCompletionsRequest {
            model: config.model.trim().to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }

    fn map_success_response(&self, response_body: &str) -> Result<String, AiError> {
        let response: ChatCompletionsResponse =
            serde_json::from_str(response_body).map_err(|err| {
                AiError::invalid_response(format!("OpenAI response decode failed: {err}"))
            })?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            AiError::invalid_response("OpenAI response did not include any choices")
        })?;

        choice
            .message
            .and_then(|message| message.content)
            .and_then(|content| extract_message_content(&content))
            .and_then(non_blank)
            .ok_or_else(|| {
                AiError::invalid_response("OpenAI response did not include message content")
            })
    }
}

impl VendorAdapter for OpenAiAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::OpenAi
    }

    fn complete(&self, prompt: &str, config: &ProviderConfig) -> Result<String, AiError> {
        let payload = self.build_request_payload(prompt, config);

        let response = self
            .client
            .post(self.endpoint_url())
            .bearer_auth(config.api_key.trim())
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .map_err(|err| map_transport_error(VENDOR_NAME, err))?;

        let status = response.status();
        let response_body = response
            .text()
            .map_err(|err| map_transport_error(VENDOR_NAME, err))?;
        if !status.is_success() {
            return Err(map_http_error(VENDOR_NAME, status, &response_body));
        }

        self.map_success_response(&response_body)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u16,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<Value>,
}

// Content is usually a string; some compatible servers send an array of text parts.
fn extract_message_content(content: &Value) -> Option<String> {
    match content {
        Value::String(text) => Some(text.clone()),
        Value::Array(parts) => Some(
            parts
                .iter()
                .filter_map(|part| match part {
                    Value::String(text) => Some(text.as_str()),
                    Value::Object(map) => map.get("text").and_then(Value::as_str),
                    _ => None,
                })
                .collect::<String>(),
        ),
        _ => None,
    }
}

fn build_v1_url(api_base_url: &str, endpoint_path: &str) -> String {
    let base = api_base_url.trim_end_matches('/');
    let endpoint_path = endpoint_path.trim_start_matches('/');

    if base.ends_with("/v1") {
        format!("{base}/{endpoint_path}")
    } else {
        format!("{base}/v1/{endpoint_path}")
    }
}

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{AiError, ProviderConfig, Vendor};

use super::VendorAdapter;
use super::response_parsing::{map_http_error, map_transport_error, non_blank};

const VENDOR_NAME: &str = "Anthropic";
const API_VERSION: &str = "2023-06-01";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const MAX_TOKENS: u16 = 1000;

pub struct AnthropicAdapter {
    api_base_url: String,
    client: Client,
}

impl AnthropicAdapter {
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
                "Anthropic API base URL must not be empty",
            ));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| {
            AiError::internal(format!("failed to create Anthropic HTTP client: {err}"))
        })?;

        Ok(Self {
            api_base_url,
            client,
        })
    }

    fn endpoint_url(&self) -> String {
        format!("{}/v1/messages", self.api_base_url.trim_end_matches('/'))
    }

    fn build_request_payload(&self, prompt: &str, config: &ProviderConfig) -> MessagesRequest {
        MessagesRequest {
            model: config.model.trim().to_string(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }

    fn map_success_response(&self, response_body: &str) -> Result<String, AiError> {
        let response: MessagesResponse = serde_json::from_str(response_body).map_err(|err| {
            AiError::invalid_response(format!("Anthropic response decode failed: {err}"))
        })?;

        response
            .content
            .into_iter()
            .find_map(ContentBlock::into_text)
            .and_then(non_blank)
            .ok_or_else(|| {
                AiError::invalid_response("Anthropic response did not include a text content block")
            })
    }
}

impl VendorAdapter for AnthropicAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Anthropic
    }

    fn complete(&self, prompt: &str, config: &ProviderConfig) -> Result<String, AiError> {
        let payload = self.build_request_payload(prompt, config);

        let response = self
            .client
            .post(self.endpoint_url())
            .header("x-api-key", config.api_key.trim())
            .header("anthropic-version", API_VERSION)
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
struct MessagesRequest {
    model: String,
    max_tokens: u16,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

impl ContentBlock {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text { text } => Some(text),
            Self::Other => None,
        }
    }
}

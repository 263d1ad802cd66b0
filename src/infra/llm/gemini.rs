use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{AiError, ProviderConfig, Vendor};

use super::VendorAdapter;
use super::response_parsing::{map_http_error, map_transport_error, non_blank};

const VENDOR_NAME: &str = "Gemini";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_PATH: &str = "v1beta/models";
const TEMPERATURE: f32 = 0.7;
const TOP_K: u32 = 40;
const TOP_P: f32 = 0.95;
const MAX_OUTPUT_TOKENS: u16 = 1000;

pub struct GeminiAdapter {
    api_base_url: String,
    client: Client,
}

impl GeminiAdapter {
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
                "Gemini API base URL must not be empty",
            ));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| {
            AiError::internal(format!("failed to create Gemini HTTP client: {err}"))
        })?;

        Ok(Self {
            api_base_url,
            client,
        })
    }

    /// The API key travels as the `key` query parameter, added at send time.
    fn endpoint_url(&self, model: &str) -> String {
        format!(
            "{}/{API_PATH}/{}:generateContent",
            self.api_base_url.trim_end_matches('/'),
            model.trim()
        )
    }

    fn build_request_payload(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }

    fn map_success_response(&self, response_body: &str) -> Result<String, AiError> {
        let response: GenerateContentResponse =
            serde_json::from_str(response_body).map_err(|err| {
                AiError::invalid_response(format!("Gemini response decode failed: {err}"))
            })?;

        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            AiError::invalid_response("Gemini response did not include any candidates")
        })?;

        candidate
            .content
            .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
            .and_then(non_blank)
            .ok_or_else(|| AiError::invalid_response("Gemini candidate did not include text"))
    }
}

impl VendorAdapter for GeminiAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Gemini
    }

    fn complete(&self, prompt: &str, config: &ProviderConfig) -> Result<String, AiError> {
        let payload = self.build_request_payload(prompt);

        let response = self
            .client
            .post(self.endpoint_url(&config.model))
            .query(&[("key", config.api_key.trim())])
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .map_err(|err| map_transport_error(VENDOR_NAME, err.without_url()))?;

        let status = response.status();
        let response_body = response
            .text()
            .map_err(|err| map_transport_error(VENDOR_NAME, err.without_url()))?;
        if !status.is_success() {
            return Err(map_http_error(VENDOR_NAME, status, &response_body));
        }

        self.map_success_response(&response_body)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u16,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

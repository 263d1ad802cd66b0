use reqwest::StatusCode;
use serde::Deserialize;

use crate::domain::AiError;

const MAX_ERROR_MESSAGE_LEN: usize = 256;

pub(crate) fn truncate_message(body: &str) -> String {
    let compact = body.trim().replace('\n', " ");
    compact.chars().take(MAX_ERROR_MESSAGE_LEN).collect()
}

pub(crate) fn extract_json_payload(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(fenced) = extract_markdown_fenced_block(trimmed) {
        let fenced = fenced.trim();
        if !fenced.is_empty() {
            return Some(fenced);
        }
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if start > end {
        return None;
    }
    Some(&trimmed[start..=end])
}

fn extract_markdown_fenced_block(text: &str) -> Option<&str> {
    let stripped = text.strip_prefix("```")?;
    let first_newline = stripped.find('\n')?;
    let (_, rest) = stripped.split_at(first_newline + 1);
    let end = rest.rfind("```")?;
    Some(&rest[..end])
}

pub(crate) fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

// All three vendors wrap failures as {"error": {"message": "..."}}.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

pub(crate) fn map_http_error(vendor_name: &str, status: StatusCode, body: &str) -> AiError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .map(|detail| detail.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| truncate_message(body));

    AiError::transport(format!(
        "{vendor_name} API returned HTTP {status}: {message}"
    ))
}

pub(crate) fn map_transport_error(vendor_name: &str, error: reqwest::Error) -> AiError {
    AiError::transport(format!("{vendor_name} request failed: {error}"))
}

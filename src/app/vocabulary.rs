//! Caller-side parsing of task replies.
//!
//! Vendors return plain text: a comma-separated word list for
//! `FindAlternatives` and a `{"hardWords": [...]}` JSON object for
//! `AnalyzeHardWords`. Neither shape is guaranteed by the vendor.

use std::sync::OnceLock;

use crate::domain::{AiError, HardWord};
use crate::infra::llm::extract_json_payload;
use crate::infra::llm::schema_validator::HardWordsSchemaValidator;

pub fn parse_alternatives(data: &str) -> Vec<String> {
    data.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn parse_hard_words(data: &str) -> Result<Vec<HardWord>, AiError> {
    let payload = extract_json_payload(data).ok_or_else(|| {
        AiError::invalid_response("hardWords reply did not include a JSON object")
    })?;
    hard_words_validator()?.validate_response_json(payload)
}

fn hard_words_validator() -> Result<&'static HardWordsSchemaValidator, AiError> {
    static VALIDATOR: OnceLock<HardWordsSchemaValidator> = OnceLock::new();

    if let Some(validator) = VALIDATOR.get() {
        return Ok(validator);
    }
    let validator = HardWordsSchemaValidator::new()?;
    Ok(VALIDATOR.get_or_init(|| validator))
}

use jsonschema::JSONSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{AiError, HardWord};

pub const HARD_WORDS_JSON_SCHEMA: &str = r#"
{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "type": "object",
  "required": ["hardWords"],
  "properties": {
    "hardWords": {
      "type": "array",
      "items": {
        "type": "object",
        "required": ["word"],
        "properties": {
          "word": {
            "type": "string",
            "minLength": 1
          },
          "alternatives": {
            "type": "array",
            "items": {
              "type": "string"
            }
          },
          "context": {
            "type": "string"
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct HardWordsEnvelope {
    #[serde(rename = "hardWords")]
    hard_words: Vec<HardWord>,
}

pub struct HardWordsSchemaValidator {
    compiled_schema: JSONSchema,
}

impl HardWordsSchemaValidator {
    pub fn new() -> Result<Self, AiError> {
        let schema: Value = serde_json::from_str(HARD_WORDS_JSON_SCHEMA).map_err(|err| {
            AiError::internal(format!("invalid built-in hardWords schema: {err}"))
        })?;
        let compiled_schema = JSONSchema::compile(&schema).map_err(|err| {
            AiError::internal(format!("failed to compile hardWords schema: {err}"))
        })?;
        Ok(Self { compiled_schema })
    }

    pub fn validate_response_json(&self, response_json: &str) -> Result<Vec<HardWord>, AiError> {
        let json_value: Value = serde_json::from_str(response_json).map_err(|err| {
            AiError::invalid_response(format!("hardWords JSON decode failed: {err}"))
        })?;
        self.validate_response_value(json_value)
    }

    pub fn validate_response_value(&self, response: Value) -> Result<Vec<HardWord>, AiError> {
        self.compiled_schema
            .validate(&response)
            .map_err(schema_validation_error)?;

        let envelope: HardWordsEnvelope = serde_json::from_value(response).map_err(|err| {
            AiError::invalid_response(format!(
                "response JSON did not match the hardWords contract: {err}"
            ))
        })?;

        Ok(envelope
            .hard_words
            .into_iter()
            .filter_map(normalize_hard_word)
            .collect())
    }
}

fn normalize_hard_word(mut hard_word: HardWord) -> Option<HardWord> {
    hard_word.word = hard_word.word.trim().to_string();
    if hard_word.word.is_empty() {
        return None;
    }
    hard_word.alternatives = hard_word
        .alternatives
        .into_iter()
        .map(|alternative| alternative.trim().to_string())
        .filter(|alternative| !alternative.is_empty())
        .collect();
    hard_word.context = hard_word.context.trim().to_string();
    Some(hard_word)
}

fn schema_validation_error<'a, I>(errors: I) -> AiError
where
    I: IntoIterator<Item = jsonschema::ValidationError<'a>>,
{
    let details = errors
        .into_iter()
        .map(|err| err.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    AiError::invalid_response(format!("hardWords schema validation failed: {details}"))
}

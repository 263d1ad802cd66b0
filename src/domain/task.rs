use serde::{Deserialize, Serialize};

use super::AiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Simplify,
    FindAlternatives,
    AnalyzeHardWords,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simplify => "simplify",
            Self::FindAlternatives => "find_alternatives",
            Self::AnalyzeHardWords => "analyze_hard_words",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Task {
    Simplify { text: String },
    FindAlternatives { word: String, context: String },
    AnalyzeHardWords { text: String },
}

impl Task {
    pub fn simplify(text: impl Into<String>) -> Self {
        Self::Simplify { text: text.into() }
    }

    pub fn find_alternatives(word: impl Into<String>, context: impl Into<String>) -> Self {
        Self::FindAlternatives {
            word: word.into(),
            context: context.into(),
        }
    }

    pub fn analyze_hard_words(text: impl Into<String>) -> Self {
        Self::AnalyzeHardWords { text: text.into() }
    }

    pub fn kind(&self) -> TaskKind {
        match self {
            Self::Simplify { .. } => TaskKind::Simplify,
            Self::FindAlternatives { .. } => TaskKind::FindAlternatives,
            Self::AnalyzeHardWords { .. } => TaskKind::AnalyzeHardWords,
        }
    }
}

/// Outcome of one task. Exactly one of `data` / `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaskResponse {
    pub fn ok(data: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn into_result(self) -> Result<String, AiError> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (true, None, _) => Err(AiError::invalid_response(
                "successful task response did not include data",
            )),
            (false, _, Some(error)) => Err(AiError::from_message(error)),
            (false, _, None) => Err(AiError::internal("task failed without an error message")),
        }
    }
}

impl From<Result<String, AiError>> for TaskResponse {
    fn from(result: Result<String, AiError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::failure(error.to_string()),
        }
    }
}

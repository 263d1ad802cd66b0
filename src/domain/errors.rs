use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Transport,
    ResponseShape,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    #[error("configuration error: {message}")]
    Configuration { message: String },
    #[error("Provider not supported")]
    UnsupportedProvider,
    #[error("{message}")]
    Transport { message: String },
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },
    #[error("note storage failed: {message}")]
    Storage { message: String },
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl AiError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Rebuilds an error from its display text. Messages without a known
    /// prefix are transport errors, which display unprefixed.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message == "Provider not supported" {
            return Self::UnsupportedProvider;
        }

        if let Some(rest) = message.strip_prefix("configuration error: ") {
            return Self::configuration(rest);
        }
        if let Some(rest) = message.strip_prefix("invalid response: ") {
            return Self::invalid_response(rest);
        }
        if let Some(rest) = message.strip_prefix("note storage failed: ") {
            return Self::storage(rest);
        }
        if let Some(rest) = message.strip_prefix("internal error: ") {
            return Self::internal(rest);
        }
        Self::transport(message)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration { .. } | Self::UnsupportedProvider => {
                ErrorCategory::Configuration
            }
            Self::Transport { .. } => ErrorCategory::Transport,
            Self::InvalidResponse { .. } => ErrorCategory::ResponseShape,
            Self::Storage { .. } | Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "anthropic")]
    Anthropic,
}

impl Vendor {
    pub const ALL: [Vendor; 3] = [Vendor::OpenAi, Vendor::Gemini, Vendor::Anthropic];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Anthropic => "anthropic",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Gemini",
            Self::Anthropic => "Anthropic",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Gemini => "gemini-1.5-flash",
            Self::Anthropic => "claude-3-5-sonnet-20241022",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vendor {
    type Err = AiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(AiError::configuration(format!(
                "unknown provider '{other}' (expected one of: openai, gemini, anthropic)"
            ))),
        }
    }
}

/// Credential and model selection for one vendor.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub vendor: Vendor,
    pub api_key: String,
    pub model: String,
    #[serde(default)]
    pub is_active: bool,
}

impl ProviderConfig {
    pub fn new(vendor: Vendor, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            vendor,
            api_key: api_key.into(),
            model: model.into(),
            is_active: false,
        }
    }

    pub fn active(mut self) -> Self {
        self.is_active = true;
        self
    }

    /// Checked before any request leaves the process.
    pub fn validate(&self) -> Result<(), AiError> {
        if self.api_key.trim().is_empty() {
            return Err(AiError::configuration(format!(
                "{} API key must not be empty",
                self.vendor.display_name()
            )));
        }
        if self.model.trim().is_empty() {
            return Err(AiError::configuration(format!(
                "{} model must not be empty",
                self.vendor.display_name()
            )));
        }
        Ok(())
    }
}

// Keeps the credential out of logs and panic messages.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("vendor", &self.vendor)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("is_active", &self.is_active)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl ProviderSettings {
    pub fn new(providers: Vec<ProviderConfig>) -> Self {
        Self { providers }
    }

    pub fn active(&self) -> Result<&ProviderConfig, AiError> {
        let mut active = self.providers.iter().filter(|provider| provider.is_active);
        let first = active
            .next()
            .ok_or_else(|| AiError::configuration("no active provider configured"))?;

        let extra = active.count();
        if extra > 0 {
            return Err(AiError::configuration(format!(
                "exactly one provider may be active (found {})",
                extra + 1
            )));
        }

        Ok(first)
    }

    pub fn get(&self, vendor: Vendor) -> Option<&ProviderConfig> {
        self.providers
            .iter()
            .find(|provider| provider.vendor == vendor)
    }

    pub fn activate(&mut self, vendor: Vendor) -> Result<(), AiError> {
        if self.get(vendor).is_none() {
            return Err(AiError::configuration(format!(
                "provider '{vendor}' is not configured"
            )));
        }

        for provider in &mut self.providers {
            provider.is_active = provider.vendor == vendor;
        }
        Ok(())
    }
}

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{AiError, ProviderConfig, ProviderSettings, Vendor};

use super::env::{parse_timeout_seconds, read_env_var, read_timeout_with};
use super::llm::AdapterEndpoints;

pub const ENV_SETTINGS_PATH: &str = "LEXINOTE_SETTINGS";
const ENV_PROVIDER: &str = "LEXINOTE_PROVIDER";
const ENV_MODEL: &str = "LEXINOTE_MODEL";
const ENV_API_KEY: &str = "LEXINOTE_API_KEY";
const ENV_OPENAI_BASE_URL: &str = "LEXINOTE_OPENAI_BASE_URL";
const ENV_GEMINI_BASE_URL: &str = "LEXINOTE_GEMINI_BASE_URL";
const ENV_ANTHROPIC_BASE_URL: &str = "LEXINOTE_ANTHROPIC_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "LEXINOTE_LLM_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    pub settings: ProviderSettings,
    pub endpoints: AdapterEndpoints,
}

#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    endpoints: EndpointOverrides,
    #[serde(default)]
    providers: Vec<ProviderConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct EndpointOverrides {
    openai: Option<String>,
    gemini: Option<String>,
    anthropic: Option<String>,
}

pub fn load_settings_file(path: &Path) -> Result<LoadedSettings, AiError> {
    let raw = fs::read_to_string(path).map_err(|err| {
        AiError::configuration(format!(
            "failed to read settings file '{}': {err}",
            path.display()
        ))
    })?;
    debug!(path = %path.display(), "loaded settings file");
    parse_settings(&raw).map_err(|err| match err {
        AiError::Configuration { message } => {
            AiError::configuration(format!("{}: {message}", path.display()))
        }
        other => other,
    })
}

pub fn parse_settings(raw: &str) -> Result<LoadedSettings, AiError> {
    let file: SettingsFile = toml::from_str(raw)
        .map_err(|err| AiError::configuration(format!("invalid settings TOML: {err}")))?;

    let timeout = match file.timeout_secs {
        Some(seconds) => Some(parse_timeout_seconds("timeout_secs", &seconds.to_string())?),
        None => None,
    };

    let defaults = AdapterEndpoints::default();
    let endpoints = AdapterEndpoints {
        openai_base_url: file.endpoints.openai.unwrap_or(defaults.openai_base_url),
        gemini_base_url: file.endpoints.gemini.unwrap_or(defaults.gemini_base_url),
        anthropic_base_url: file
            .endpoints
            .anthropic
            .unwrap_or(defaults.anthropic_base_url),
        timeout,
    };

    let settings = ProviderSettings::new(file.providers);
    // Surface a broken selection at load time instead of at the first request.
    if settings.providers.iter().filter(|p| p.is_active).count() > 1 {
        settings.active()?;
    }

    Ok(LoadedSettings {
        settings,
        endpoints,
    })
}

/// Loads settings from `path` when given, otherwise from `LEXINOTE_*`
/// variables. Endpoint variables override the file's endpoints.
pub fn resolve_settings(path: Option<&Path>) -> Result<LoadedSettings, AiError> {
    resolve_settings_with(path, read_env_var)
}

fn resolve_settings_with<F>(path: Option<&Path>, lookup: F) -> Result<LoadedSettings, AiError>
where
    F: Fn(&str) -> Result<Option<String>, AiError>,
{
    match path {
        Some(path) => {
            let mut loaded = load_settings_file(path)?;
            loaded.endpoints = endpoints_from_lookup(loaded.endpoints, &lookup)?;
            Ok(loaded)
        }
        None => settings_from_lookup(lookup),
    }
}

/// Builds a single active provider from `LEXINOTE_*` variables.
fn settings_from_lookup<F>(lookup: F) -> Result<LoadedSettings, AiError>
where
    F: Fn(&str) -> Result<Option<String>, AiError>,
{
    let vendor = lookup(ENV_PROVIDER)?
        .ok_or_else(|| {
            AiError::configuration(format!(
                "no active provider configured (set {ENV_PROVIDER} or {ENV_SETTINGS_PATH})"
            ))
        })?
        .parse::<Vendor>()?;

    let vendor_key_var = vendor_api_key_var(vendor);
    let api_key = match lookup(ENV_API_KEY)? {
        Some(key) => key,
        None => lookup(vendor_key_var)?.ok_or_else(|| {
            AiError::configuration(format!(
                "{} API key is missing (set {ENV_API_KEY} or {vendor_key_var})",
                vendor.display_name()
            ))
        })?,
    };
    let model = lookup(ENV_MODEL)?.unwrap_or_else(|| vendor.default_model().to_string());
    let provider = ProviderConfig::new(vendor, api_key, model).active();

    Ok(LoadedSettings {
        settings: ProviderSettings::new(vec![provider]),
        endpoints: endpoints_from_lookup(AdapterEndpoints::default(), &lookup)?,
    })
}

/// Applies `LEXINOTE_*_BASE_URL` and timeout overrides on top of `base`.
fn endpoints_from_lookup<F>(base: AdapterEndpoints, lookup: F) -> Result<AdapterEndpoints, AiError>
where
    F: Fn(&str) -> Result<Option<String>, AiError>,
{
    Ok(AdapterEndpoints {
        openai_base_url: lookup(ENV_OPENAI_BASE_URL)?.unwrap_or(base.openai_base_url),
        gemini_base_url: lookup(ENV_GEMINI_BASE_URL)?.unwrap_or(base.gemini_base_url),
        anthropic_base_url: lookup(ENV_ANTHROPIC_BASE_URL)?.unwrap_or(base.anthropic_base_url),
        timeout: read_timeout_with(ENV_TIMEOUT_SECS, &lookup)?.or(base.timeout),
    })
}

fn vendor_api_key_var(vendor: Vendor) -> &'static str {
    match vendor {
        Vendor::OpenAi => "OPENAI_API_KEY",
        Vendor::Gemini => "GEMINI_API_KEY",
        Vendor::Anthropic => "ANTHROPIC_API_KEY",
    }
}

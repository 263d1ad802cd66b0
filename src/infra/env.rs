use std::time::Duration;

use crate::domain::AiError;

pub(crate) fn read_env_var(name: &str) -> Result<Option<String>, AiError> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(error) => Err(AiError::configuration(format!(
            "{name} could not be read: {error}"
        ))),
    }
}

pub(crate) fn parse_timeout_seconds(name: &str, value: &str) -> Result<Duration, AiError> {
    let parsed = value.trim().parse::<u64>().map_err(|_| {
        AiError::configuration(format!("{name} must be a positive integer in seconds"))
    })?;
    if parsed == 0 {
        return Err(AiError::configuration(format!(
            "{name} must be greater than 0 seconds"
        )));
    }
    Ok(Duration::from_secs(parsed))
}

pub(crate) fn read_timeout_with<F>(name: &str, lookup: F) -> Result<Option<Duration>, AiError>
where
    F: FnOnce(&str) -> Result<Option<String>, AiError>,
{
    let Some(value) = lookup(name)? else {
        return Ok(None);
    };
    Ok(Some(parse_timeout_seconds(name, &value)?))
}

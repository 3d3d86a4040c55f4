use crate::config::types::{Config, FetcherConfig, HeaderConfig, PoolConfig};
use crate::ConfigError;
use reqwest::header::HeaderValue;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_pool_config(&config.pool)?;
    validate_header_config(&config.headers)?;
    Ok(())
}

/// Validates fetcher timing and retry settings
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    if config.retry_delay_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "retry_delay_ms must be <= 60000ms, got {}ms",
            config.retry_delay_ms
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be between 1 and timeout_secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates worker pool settings
fn validate_pool_config(config: &PoolConfig) -> Result<(), ConfigError> {
    if config.workers < 1 || config.workers > 100 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 100, got {}",
            config.workers
        )));
    }

    Ok(())
}

/// Validates the header rotation lists
fn validate_header_config(config: &HeaderConfig) -> Result<(), ConfigError> {
    validate_header_list("user_agents", &config.user_agents)?;
    validate_header_list("accept_languages", &config.accept_languages)?;
    Ok(())
}

/// Every entry must be usable verbatim as an HTTP header value
fn validate_header_list(name: &str, values: &[String]) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
    }

    for value in values {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{} contains a blank entry",
                name
            )));
        }

        if HeaderValue::from_str(value).is_err() {
            return Err(ConfigError::Validation(format!(
                "{} entry '{}' is not a valid header value",
                name, value
            )));
        }
    }

    Ok(())
}

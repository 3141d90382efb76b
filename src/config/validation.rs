use crate::config::types::{Config, DatabaseConfig, DefaultsConfig, HttpConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_database_config(&config.database)?;
    validate_defaults_config(&config.defaults)?;
    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be between 1 and timeout-secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.max_redirects > 20 {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= 20, got {}",
            config.max_redirects
        )));
    }

    Ok(())
}

/// Validates database configuration
fn validate_database_config(config: &DatabaseConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation(
            "database path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates conversion defaults
fn validate_defaults_config(config: &DefaultsConfig) -> Result<(), ConfigError> {
    validate_language_code(&config.language_code)?;

    if config.fallback_language_id < 1 {
        return Err(ConfigError::Validation(format!(
            "fallback-language-id must be >= 1, got {}",
            config.fallback_language_id
        )));
    }

    Ok(())
}

/// Accepts codes like `hu`, `en` or `pt-BR`
fn validate_language_code(code: &str) -> Result<(), ConfigError> {
    let mut parts = code.splitn(2, '-');
    let primary = parts.next().unwrap_or("");
    let region = parts.next();

    let is_letters = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic());

    if !is_letters(primary) || region.map_or(false, |r| !is_letters(r)) {
        return Err(ConfigError::Validation(format!(
            "language-code must be ASCII letters with an optional region, got '{}'",
            code
        )));
    }

    Ok(())
}

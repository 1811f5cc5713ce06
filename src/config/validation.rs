//! Configuration validation logic.

use regex::Regex;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Maximum handle length.
const MAX_HANDLE_LENGTH: usize = 30;

/// Maximum progress bar width.
const MAX_BAR_LENGTH: usize = 200;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_user_agent(&config.session.user_agent)?;
    validate_bar_length(config.options.bar_length)?;
    validate_delay(config.options.download_delay_ms)?;

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.trim().is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }
    Ok(())
}

pub fn validate_bar_length(length: usize) -> Result<()> {
    if length == 0 || length > MAX_BAR_LENGTH {
        return Err(Error::ConfigValidation {
            field: "bar_length".to_string(),
            message: format!("Must be between 1 and {} (got {})", MAX_BAR_LENGTH, length),
        });
    }
    Ok(())
}

pub fn validate_delay((min, max): (u64, u64)) -> Result<()> {
    if min > max {
        return Err(Error::ConfigValidation {
            field: "download_delay_ms".to_string(),
            message: format!("Minimum {} is greater than maximum {}", min, max),
        });
    }
    Ok(())
}

/// Validate a profile handle and return it without a leading `@`.
pub fn validate_handle(handle: &str) -> Result<String> {
    let clean = handle.trim().trim_start_matches('@');

    if clean.is_empty() {
        return Err(Error::MissingConfig("profile handle".to_string()));
    }

    if clean.len() > MAX_HANDLE_LENGTH {
        return Err(Error::ConfigValidation {
            field: "handle".to_string(),
            message: format!(
                "Handle '{}' is too long (maximum {} characters)",
                handle, MAX_HANDLE_LENGTH
            ),
        });
    }

    // Letters, digits, periods and underscores
    let handle_pattern = Regex::new(r"^[A-Za-z0-9._]+$")
        .map_err(|e| Error::Config(format!("Invalid handle pattern: {}", e)))?;

    if !handle_pattern.is_match(clean) || clean.contains("..") {
        return Err(Error::ConfigValidation {
            field: "handle".to_string(),
            message: format!(
                "Handle '{}' contains invalid characters. Only letters, digits, periods and underscores allowed.",
                handle
            ),
        });
    }

    let lower = clean.to_lowercase();
    if lower == "replaceme" || lower == "username" {
        return Err(Error::ConfigValidation {
            field: "handle".to_string(),
            message: format!("Handle '{}' appears to be a placeholder.", handle),
        });
    }

    Ok(clean.to_string())
}

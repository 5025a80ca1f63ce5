// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as parseable URLs, positive intervals, and non-empty identifiers.

use crate::diagnostic::ConfigError;
use crate::model::QueueDeskConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &QueueDeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.app.log_level.to_ascii_lowercase().as_str()) {
        fail(format!(
            "app.log_level `{}` is not one of {}",
            config.app.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    match url::Url::parse(config.backend.base_url.trim()) {
        Ok(url) => {
            if !matches!(url.scheme(), "http" | "https") {
                fail(format!(
                    "backend.base_url must use http or https, got `{}`",
                    url.scheme()
                ));
            }
            // Endpoint paths are joined relative to the base.
            if !url.path().ends_with('/') {
                fail(format!(
                    "backend.base_url `{}` must end with `/`",
                    config.backend.base_url
                ));
            }
        }
        Err(e) => fail(format!(
            "backend.base_url `{}` is not a valid URL: {e}",
            config.backend.base_url
        )),
    }

    if config.backend.timeout_secs == Some(0) {
        fail("backend.timeout_secs must be greater than 0 when set".to_string());
    }

    if config.branch.default_branch_id.trim().is_empty() {
        fail("branch.default_branch_id must not be empty".to_string());
    }

    if config.state.database_path.trim().is_empty() {
        fail("state.database_path must not be empty".to_string());
    }

    if config.counter.page_size == 0 {
        fail("counter.page_size must be at least 1".to_string());
    }

    if config.counter.notice_secs == 0 {
        fail("counter.notice_secs must be at least 1".to_string());
    }

    if config.display.poll_interval_secs == 0 {
        fail("display.poll_interval_secs must be at least 1".to_string());
    }

    if config.display.next_count == 0 {
        fail("display.next_count must be at least 1".to_string());
    }

    if config.intake.current_serving.trim().is_empty() {
        fail("intake.current_serving must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = QueueDeskConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn base_url_without_trailing_slash_fails() {
        let mut config = QueueDeskConfig::default();
        config.backend.base_url = "http://localhost:8080/MaxMoneyQueue".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("must end with `/`"));
    }

    #[test]
    fn unparseable_base_url_fails() {
        let mut config = QueueDeskConfig::default();
        config.backend.base_url = "not a url".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("not a valid URL"));
    }

    #[test]
    fn collects_every_error() {
        let mut config = QueueDeskConfig::default();
        config.counter.page_size = 0;
        config.display.poll_interval_secs = 0;
        config.branch.default_branch_id = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn unknown_log_level_fails() {
        let mut config = QueueDeskConfig::default();
        config.app.log_level = "verbose".to_string();
        assert!(validate_config(&config).is_err());
    }
}

use crate::config::types::{Config, HarvesterConfig, IoConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_harvester_config(&config.harvester)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_io_config(&config.io)?;
    Ok(())
}

/// Validates harvester configuration
fn validate_harvester_config(config: &HarvesterConfig) -> Result<(), ConfigError> {
    if config.max_products < 1 {
        return Err(ConfigError::Validation(format!(
            "max_products must be >= 1, got {}",
            config.max_products
        )));
    }

    validate_limit("max_concurrent_storefronts", config.max_concurrent_storefronts)?;
    validate_limit("max_concurrent_products", config.max_concurrent_products)?;

    if config.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1 when set".to_string(),
        ));
    }

    for path in &config.contact_paths {
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "contact_paths cannot contain empty entries".to_string(),
            ));
        }
    }

    if config.listing_path.trim_matches('/').is_empty() {
        return Err(ConfigError::Validation(
            "listing_path cannot be empty".to_string(),
        ));
    }

    validate_product_template(&config.product_url_template)?;

    Ok(())
}

/// Validates an optional concurrency ceiling
fn validate_limit(name: &str, limit: Option<usize>) -> Result<(), ConfigError> {
    match limit {
        Some(0) => Err(ConfigError::Validation(format!(
            "{} must be >= 1 when set",
            name
        ))),
        _ => Ok(()),
    }
}

/// Validates the product detail URL template
fn validate_product_template(template: &str) -> Result<(), ConfigError> {
    for placeholder in ["{shop}", "{handle}"] {
        if !template.contains(placeholder) {
            return Err(ConfigError::InvalidTemplate(format!(
                "'{}' is missing the {} placeholder",
                template, placeholder
            )));
        }
    }
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates input/output configuration
fn validate_io_config(config: &IoConfig) -> Result<(), ConfigError> {
    if config.input_path.is_empty() {
        return Err(ConfigError::Validation(
            "input_path cannot be empty".to_string(),
        ));
    }

    if config.output_path.is_empty() {
        return Err(ConfigError::Validation(
            "output_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, the mock root and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::schema::MockConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("mock root {} does not exist", .0.display())]
    RootMissing(PathBuf),

    #[error("mock root {} is not a directory", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("mount prefix '{0}' must start with '/'")]
    InvalidMountPrefix(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &MockConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let root = &config.resolver.root;
    match std::fs::metadata(root) {
        Ok(metadata) if !metadata.is_dir() => {
            errors.push(ValidationError::RootNotDirectory(root.clone()));
        }
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::RootMissing(root.clone())),
    }

    if !config.resolver.mount_prefix.starts_with('/') {
        errors.push(ValidationError::InvalidMountPrefix(
            config.resolver.mount_prefix.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
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
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&MockConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let root = TempDir::new().unwrap();
        let mut config = MockConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.resolver.root = root.path().join("missing");
        config.resolver.mount_prefix = "api".into();
        config.timeouts.request_secs = 0;
        config.observability.log_level = "loud".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::RootMissing(root.path().join("missing"))));
    }

    #[test]
    fn test_root_must_be_directory() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("file.json");
        std::fs::write(&file, "{}").unwrap();

        let mut config = MockConfig::default();
        config.resolver.root = file.clone();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::RootNotDirectory(file)])
        );
    }
}

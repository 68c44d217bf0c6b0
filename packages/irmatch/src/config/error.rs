//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Unknown compile phase name in a rule file
    #[error("Unknown compile phase '{0}'. Use the SCREAMING_SNAKE_CASE phase name, e.g. PRINT_IDEAL")]
    UnknownPhase(String),

    /// Rule file lists the same method twice
    #[error("Method '{0}' is declared more than once in the rule file")]
    DuplicateMethod(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Only schema version understood by this crate
pub(crate) const SUPPORTED_VERSIONS: [u32; 1] = [1];

/// Shared version gate for every versioned YAML document
pub(crate) fn check_version(version: Option<u32>) -> ConfigResult<()> {
    match version {
        None => Err(ConfigError::MissingVersion),
        Some(v) if SUPPORTED_VERSIONS.contains(&v) => Ok(()),
        Some(v) => Err(ConfigError::UnsupportedVersion {
            found: v,
            supported: SUPPORTED_VERSIONS.to_vec(),
        }),
    }
}

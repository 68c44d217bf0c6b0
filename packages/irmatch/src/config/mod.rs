//! Configuration
//!
//! Two versioned YAML documents feed the matcher:
//! - [`MatcherConfig`]: runtime options (bailout, report format)
//! - [`RuleFile`]: test class name and per-method IR rule declarations
//!
//! Both reject unknown keys and require `version: 1`.

pub mod error;
pub mod io;
pub mod matcher_config;
pub mod rule_file;

pub use error::{ConfigError, ConfigResult};
pub use matcher_config::{MatcherConfig, ReportFormat};
pub use rule_file::RuleFile;

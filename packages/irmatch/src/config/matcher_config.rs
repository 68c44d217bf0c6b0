//! Runtime options of the matcher

use super::error::{check_version, ConfigResult};
use super::io::MatcherConfigV1;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format of the failure report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Indented human-readable report
    #[default]
    Text,
    /// Machine-readable JSON report
    Json,
}

/// Matcher configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Downgrade a failure to a bailout when the compilation output contains
    /// the safepoint-while-printing marker
    pub safepoint_bailout: bool,
    pub report_format: ReportFormat,
    /// JSON report lists every matched node (otherwise only counts)
    pub include_matched_nodes: bool,
    /// Carry the raw compilation output of failed methods in the violation
    pub include_compilation_output: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            safepoint_bailout: true,
            report_format: ReportFormat::Text,
            include_matched_nodes: true,
            include_compilation_output: true,
        }
    }
}

impl MatcherConfig {
    pub fn safepoint_bailout(mut self, enabled: bool) -> Self {
        self.safepoint_bailout = enabled;
        self
    }

    pub fn report_format(mut self, format: ReportFormat) -> Self {
        self.report_format = format;
        self
    }

    pub fn include_matched_nodes(mut self, enabled: bool) -> Self {
        self.include_matched_nodes = enabled;
        self
    }

    pub fn include_compilation_output(mut self, enabled: bool) -> Self {
        self.include_compilation_output = enabled;
        self
    }

    /// Load from a YAML v1 file; absent keys keep their defaults
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: MatcherConfigV1 = serde_yaml::from_str(content)?;
        check_version(export.version)?;

        let defaults = Self::default();
        Ok(Self {
            safepoint_bailout: export.safepoint_bailout.unwrap_or(defaults.safepoint_bailout),
            report_format: export.report_format.unwrap_or(defaults.report_format),
            include_matched_nodes: export
                .include_matched_nodes
                .unwrap_or(defaults.include_matched_nodes),
            include_compilation_output: export
                .include_compilation_output
                .unwrap_or(defaults.include_compilation_output),
        })
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = MatcherConfigV1 {
            version: Some(1),
            safepoint_bailout: Some(self.safepoint_bailout),
            report_format: Some(self.report_format),
            include_matched_nodes: Some(self.include_matched_nodes),
            include_compilation_output: Some(self.include_compilation_output),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}

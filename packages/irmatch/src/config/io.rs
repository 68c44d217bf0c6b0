//! Configuration I/O (YAML loading)
//!
//! Defines the versioned YAML schema types. Conversion into the runtime types
//! lives next to those types in `matcher_config.rs` and `rule_file.rs`.

use super::matcher_config::ReportFormat;
use serde::{Deserialize, Serialize};

/// Matcher configuration, YAML Schema v1
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatcherConfigV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub safepoint_bailout: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_format: Option<ReportFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_matched_nodes: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_compilation_output: Option<bool>,
}

/// Rule declarations of one test class, YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleFileV1 {
    pub version: Option<u32>,

    /// Fully qualified test class name as it appears in the compilation log
    pub test_class: String,

    #[serde(default)]
    pub methods: Vec<MethodEntryV1>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodEntryV1 {
    pub name: String,

    #[serde(default)]
    pub rules: Vec<RuleEntryV1>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleEntryV1 {
    /// Compile phase names; empty means DEFAULT
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phase: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fail_on: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub counts: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

//! Error types for irmatch
//!
//! Two error families abort a matching run:
//! - [`FormatError`]: a rule declaration cannot be resolved (raised before
//!   the log is looked at)
//! - [`IrMatchError::FileCorrupted`] / [`IrMatchError::Io`]: the log cannot be
//!   read or has an unexpected shape
//!
//! Matching failures are not errors. They are collected into the result tree
//! and only surface as [`IrMatchError::Violation`] when the caller asks for
//! a verdict via `IrMatcher::verify`.

use crate::config::ConfigError;
use crate::features::reporting::CheckAttributeKind;
use crate::pipeline::IrViolation;
use std::fmt;
use thiserror::Error;

/// Format error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// `_#NAME#_` is not registered in the node mapping table
    UndefinedPlaceholder,
    /// Placeholder has no regex for the requested compile phase
    NoRegexForPhase,
    /// Literal regex used together with the DEFAULT phase
    NoDefaultPhase,
    /// Same compile phase listed twice in one rule
    DuplicatePhase,
    /// Composite placeholder is the last element of its attribute
    MissingPostfix,
    /// Composite placeholder followed by an empty string
    EmptyPostfix,
    /// Counts constraint without a count string
    MissingCount,
    /// Count string that is not `<comparator> <non-negative int>`
    MalformedComparison,
    /// Resolved pattern does not compile
    InvalidRegex,
    /// `_#C#...#_` used for a standalone node or vice versa
    CompositeMismatch,
}

impl FormatErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatErrorKind::UndefinedPlaceholder => "undefined_placeholder",
            FormatErrorKind::NoRegexForPhase => "no_regex_for_phase",
            FormatErrorKind::NoDefaultPhase => "no_default_phase",
            FormatErrorKind::DuplicatePhase => "duplicate_phase",
            FormatErrorKind::MissingPostfix => "missing_postfix",
            FormatErrorKind::EmptyPostfix => "empty_postfix",
            FormatErrorKind::MissingCount => "missing_count",
            FormatErrorKind::MalformedComparison => "malformed_comparison",
            FormatErrorKind::InvalidRegex => "invalid_regex",
            FormatErrorKind::CompositeMismatch => "composite_mismatch",
        }
    }
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rule declaration that cannot be turned into matchable constraints
#[derive(Debug, Clone, Error)]
#[error("[{kind}] {message}")]
pub struct FormatError {
    pub kind: FormatErrorKind,
    pub message: String,
    /// Method and rule id the error was raised for, once known
    pub method: Option<String>,
    pub rule_id: Option<usize>,
    /// Check attribute and 1-based constraint index, once known
    pub constraint: Option<(CheckAttributeKind, usize)>,
}

impl FormatError {
    pub fn new(kind: FormatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            method: None,
            rule_id: None,
            constraint: None,
        }
    }

    /// Attach the failOn / counts constraint the error was raised for
    pub fn at_constraint(mut self, kind: CheckAttributeKind, index: usize) -> Self {
        if self.constraint.is_some() {
            return self;
        }
        self.message = format!("{} ({} constraint {})", self.message, kind.as_str(), index);
        self.constraint = Some((kind, index));
        self
    }

    /// Attach the method and rule the failing declaration belongs to
    pub fn in_rule(mut self, method: impl Into<String>, rule_id: usize) -> Self {
        let method = method.into();
        self.message = format!(
            "{} (method \"{}\", @IR rule {})",
            self.message, method, rule_id
        );
        self.method = Some(method);
        self.rule_id = Some(rule_id);
        self
    }

    pub fn undefined_placeholder(node: &str) -> Self {
        Self::new(
            FormatErrorKind::UndefinedPlaceholder,
            format!(
                "IR node \"{}\" has no entry in the node mapping table. \
                 Add a mapping for it or use a plain regex instead",
                node
            ),
        )
    }

    pub fn no_regex_for_phase(node: &str, phase: impl fmt::Display) -> Self {
        Self::new(
            FormatErrorKind::NoRegexForPhase,
            format!(
                "IR node \"{}\" has no regex defined for compile phase {}. \
                 If this phase should be supported, add it to the node's mapping",
                node, phase
            ),
        )
    }

    pub fn no_default_phase(raw: &str) -> Self {
        Self::new(
            FormatErrorKind::NoDefaultPhase,
            format!(
                "\"{}\" is not an IR node placeholder and has no default compile phase. \
                 Set the rule's phase attribute to a concrete compile phase instead of DEFAULT",
                raw
            ),
        )
    }
}

/// Main error type for irmatch operations
#[derive(Debug, Error)]
pub enum IrMatchError {
    /// Rule declaration could not be resolved
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Log line with an unexpected shape
    #[error("Unexpected format of {file}: unexpected format found on this line: {line}")]
    FileCorrupted { file: String, line: String },

    /// Log could not be read
    #[error("Error while reading {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration or rule file could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON report could not be rendered
    #[error("Report rendering failed: {0}")]
    Report(#[from] serde_json::Error),

    /// IR rules failed (carries the report and the raw compilation output)
    #[error("{}", .0.report)]
    Violation(Box<IrViolation>),
}

impl IrMatchError {
    pub fn file_corrupted(file: impl Into<String>, line: impl Into<String>) -> Self {
        IrMatchError::FileCorrupted {
            file: file.into(),
            line: line.into(),
        }
    }

    pub fn io(file: impl Into<String>, source: std::io::Error) -> Self {
        IrMatchError::Io {
            file: file.into(),
            source,
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, IrMatchError::Format(_))
    }
}

/// Result type alias for irmatch operations
pub type Result<T> = std::result::Result<T, IrMatchError>;

//! Resolved constraints

use crate::errors::{FormatError, FormatErrorKind};
use crate::features::reporting::{ConstraintFailure, CountsConstraintFailure, FailOnConstraintFailure};
use crate::shared::models::{CompilePhase, Comparison};
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    FailOn,
    Counts(Comparison),
}

/// One regex of a failOn or counts attribute, bound to a compile phase
#[derive(Debug, Clone)]
pub struct Constraint {
    index: usize,
    pattern: String,
    regex: Regex,
    phase: CompilePhase,
    kind: ConstraintKind,
}

impl Constraint {
    /// Compiles `pattern` eagerly
    pub fn new(
        index: usize,
        pattern: impl Into<String>,
        phase: CompilePhase,
        kind: ConstraintKind,
    ) -> Result<Self, FormatError> {
        let pattern = pattern.into();
        let regex = Regex::new(&pattern).map_err(|e| {
            FormatError::new(
                FormatErrorKind::InvalidRegex,
                format!("Constraint {}: \"{}\" is not a valid regex: {}", index, pattern, e),
            )
        })?;
        Ok(Self {
            index,
            pattern,
            regex,
            phase,
            kind,
        })
    }

    pub fn fail_on(index: usize, pattern: impl Into<String>, phase: CompilePhase) -> Result<Self, FormatError> {
        Self::new(index, pattern, phase, ConstraintKind::FailOn)
    }

    pub fn counts(
        index: usize,
        pattern: impl Into<String>,
        phase: CompilePhase,
        comparison: Comparison,
    ) -> Result<Self, FormatError> {
        Self::new(index, pattern, phase, ConstraintKind::Counts(comparison))
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn phase(&self) -> CompilePhase {
        self.phase
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// Every non-overlapping match in `output`
    pub fn matched_nodes(&self, output: &str) -> Vec<String> {
        self.regex
            .find_iter(output)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    pub fn apply(&self, output: &str) -> Option<ConstraintFailure> {
        let matched_nodes = self.matched_nodes(output);
        match &self.kind {
            ConstraintKind::FailOn if matched_nodes.is_empty() => None,
            ConstraintKind::FailOn => Some(ConstraintFailure::FailOn(FailOnConstraintFailure {
                index: self.index,
                pattern: self.pattern.clone(),
                matched_nodes,
            })),
            ConstraintKind::Counts(comparison) if comparison.compare(matched_nodes.len()) => None,
            ConstraintKind::Counts(comparison) => Some(ConstraintFailure::Counts(CountsConstraintFailure {
                index: self.index,
                pattern: self.pattern.clone(),
                matched_nodes,
                comparison: comparison.clone(),
            })),
        }
    }
}

/// Same resolved constraint, regardless of the compiled regex instance
impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.pattern == other.pattern
            && self.phase == other.phase
            && self.kind == other.kind
    }
}

impl Eq for Constraint {}

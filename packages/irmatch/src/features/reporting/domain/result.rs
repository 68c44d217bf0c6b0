//! Match result tree
//!
//! Nodes are only created for failures: a rule that passes leaves no
//! [`IrRuleMatchResult`] behind, a method whose rules all pass leaves no
//! [`IrMethodResult`]. `fail()` on every level is "has children".

use crate::shared::models::{Compilation, CompilePhase, Comparison};
use serde::Serialize;
use std::fmt;

/// Root of the tree, methods in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestClassResult {
    pub methods: Vec<IrMethodResult>,
}

impl TestClassResult {
    pub fn new(methods: Vec<IrMethodResult>) -> Self {
        Self { methods }
    }

    pub fn fail(&self) -> bool {
        !self.methods.is_empty()
    }

    pub fn failed_method_names(&self) -> Vec<&str> {
        self.methods.iter().map(IrMethodResult::method).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrMethodResult {
    Matched(IrMethodMatchResult),
    NotCompiled(NotCompiledResult),
}

impl IrMethodResult {
    pub fn method(&self) -> &str {
        match self {
            IrMethodResult::Matched(r) => &r.method,
            IrMethodResult::NotCompiled(r) => &r.method,
        }
    }

    /// Rules reported as failed for this method
    pub fn failed_rule_count(&self) -> usize {
        match self {
            IrMethodResult::Matched(r) => r.rules.len(),
            IrMethodResult::NotCompiled(r) => r.rule_count,
        }
    }

    pub fn compilation(&self) -> Option<&Compilation> {
        match self {
            IrMethodResult::Matched(r) => Some(&r.compilation),
            IrMethodResult::NotCompiled(_) => None,
        }
    }
}

/// Failed rules of a compiled method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrMethodMatchResult {
    pub method: String,
    pub rules: Vec<IrRuleMatchResult>,
    /// Output the rules were matched against
    pub compilation: Compilation,
}

/// Method with rules but without any captured compilation output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotCompiledResult {
    pub method: String,
    pub rule_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrRuleMatchResult {
    pub rule_id: usize,
    pub annotation: String,
    pub phases: Vec<CompilePhaseMatchResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilePhaseMatchResult {
    pub phase: CompilePhase,
    /// Phase was requested but never dumped for this compilation
    pub no_compilation_output: bool,
    pub check_attributes: Vec<CheckAttributeMatchResult>,
}

impl CompilePhaseMatchResult {
    pub fn no_compilation_output(phase: CompilePhase) -> Self {
        Self {
            phase,
            no_compilation_output: true,
            check_attributes: Vec::new(),
        }
    }

    /// `None` if no check attribute failed
    pub fn checked(phase: CompilePhase, check_attributes: Vec<CheckAttributeMatchResult>) -> Option<Self> {
        if check_attributes.is_empty() {
            None
        } else {
            Some(Self {
                phase,
                no_compilation_output: false,
                check_attributes,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CheckAttributeKind {
    #[serde(rename = "failOn")]
    FailOn,
    #[serde(rename = "counts")]
    Counts,
}

impl CheckAttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckAttributeKind::FailOn => "failOn",
            CheckAttributeKind::Counts => "counts",
        }
    }
}

impl fmt::Display for CheckAttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckAttributeMatchResult {
    pub kind: CheckAttributeKind,
    /// Constraint index order
    pub failures: Vec<ConstraintFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintFailure {
    FailOn(FailOnConstraintFailure),
    Counts(CountsConstraintFailure),
}

impl ConstraintFailure {
    pub fn index(&self) -> usize {
        match self {
            ConstraintFailure::FailOn(f) => f.index,
            ConstraintFailure::Counts(f) => f.index,
        }
    }

    pub fn matched_nodes(&self) -> &[String] {
        match self {
            ConstraintFailure::FailOn(f) => &f.matched_nodes,
            ConstraintFailure::Counts(f) => &f.matched_nodes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailOnConstraintFailure {
    pub index: usize,
    pub pattern: String,
    pub matched_nodes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountsConstraintFailure {
    pub index: usize,
    pub pattern: String,
    pub matched_nodes: Vec<String>,
    pub comparison: Comparison,
}

impl CountsConstraintFailure {
    pub fn found(&self) -> usize {
        self.matched_nodes.len()
    }
}

//! failOn / counts attribute of one phase rule

use crate::features::matching::domain::constraint::Constraint;
use crate::features::reporting::{CheckAttributeKind, CheckAttributeMatchResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckAttribute {
    kind: CheckAttributeKind,
    constraints: Vec<Constraint>,
}

impl CheckAttribute {
    pub fn new(kind: CheckAttributeKind, constraints: Vec<Constraint>) -> Self {
        Self { kind, constraints }
    }

    /// `None` for an empty constraint list
    pub fn non_empty(kind: CheckAttributeKind, constraints: Vec<Constraint>) -> Option<Self> {
        (!constraints.is_empty()).then(|| Self::new(kind, constraints))
    }

    pub fn kind(&self) -> CheckAttributeKind {
        self.kind
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Every constraint is evaluated, failures kept in index order
    pub fn apply(&self, output: &str) -> Option<CheckAttributeMatchResult> {
        let failures: Vec<_> = self.constraints.iter().filter_map(|c| c.apply(output)).collect();
        (!failures.is_empty()).then_some(CheckAttributeMatchResult {
            kind: self.kind,
            failures,
        })
    }
}

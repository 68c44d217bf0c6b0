//! Constraints of one IR rule for one compile phase

use crate::features::matching::domain::check_attribute::CheckAttribute;
use crate::features::reporting::CompilePhaseMatchResult;
use crate::shared::models::{Compilation, CompilePhase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilePhaseIrRule {
    phase: CompilePhase,
    fail_on: Option<CheckAttribute>,
    counts: Option<CheckAttribute>,
}

impl CompilePhaseIrRule {
    pub fn new(phase: CompilePhase, fail_on: Option<CheckAttribute>, counts: Option<CheckAttribute>) -> Self {
        Self { phase, fail_on, counts }
    }

    pub fn phase(&self) -> CompilePhase {
        self.phase
    }

    pub fn fail_on(&self) -> Option<&CheckAttribute> {
        self.fail_on.as_ref()
    }

    pub fn counts(&self) -> Option<&CheckAttribute> {
        self.counts.as_ref()
    }

    /// failOn and counts are evaluated independently of each other
    pub fn apply(&self, compilation: &Compilation) -> Option<CompilePhaseMatchResult> {
        let Some(output) = compilation.output(self.phase) else {
            return Some(CompilePhaseMatchResult::no_compilation_output(self.phase));
        };
        let check_attributes = [&self.fail_on, &self.counts]
            .into_iter()
            .flatten()
            .filter_map(|attribute| attribute.apply(output))
            .collect();
        CompilePhaseMatchResult::checked(self.phase, check_attributes)
    }
}

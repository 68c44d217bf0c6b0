//! Parse-time record of a method under test

use crate::shared::models::{Compilation, CompilePhase, RepeatPolicy};
use std::collections::BTreeMap;

/// Mutable while the log is scanned, turned into a [`Compilation`] at the end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestMethod {
    name: String,
    outputs: BTreeMap<CompilePhase, String>,
}

impl TestMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outputs: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Drop captured output of an earlier compilation
    pub fn clear(&mut self) {
        self.outputs.clear();
    }

    /// Store a phase dump, honouring the phase's repeat policy
    pub fn set_output(&mut self, phase: CompilePhase, output: String) {
        match phase.repeat_policy() {
            RepeatPolicy::KeepFirst => {
                self.outputs.entry(phase).or_insert(output);
            }
            RepeatPolicy::KeepLast => {
                self.outputs.insert(phase, output);
            }
        }
    }

    pub fn has_output(&self, phase: CompilePhase) -> bool {
        self.outputs.contains_key(&phase)
    }

    /// `None` when no phase dump was captured
    pub fn into_compilation(self) -> Option<Compilation> {
        if self.outputs.is_empty() {
            None
        } else {
            Some(Compilation::new(self.outputs))
        }
    }
}

//! Captured compilation output of one method

use super::compile_phase::CompilePhase;
use std::collections::BTreeMap;

/// Phase → dump text of the latest compilation of a method
///
/// Immutable once log parsing has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compilation {
    outputs: BTreeMap<CompilePhase, String>,
}

impl Compilation {
    pub fn new(outputs: BTreeMap<CompilePhase, String>) -> Self {
        Self { outputs }
    }

    pub fn output(&self, phase: CompilePhase) -> Option<&str> {
        self.outputs.get(&phase).map(String::as_str)
    }

    pub fn has_output(&self, phase: CompilePhase) -> bool {
        self.outputs.contains_key(&phase)
    }

    /// Captured phases in phase order
    pub fn phases(&self) -> impl Iterator<Item = CompilePhase> + '_ {
        self.outputs.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CompilePhase, &str)> {
        self.outputs.iter().map(|(p, s)| (*p, s.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl FromIterator<(CompilePhase, String)> for Compilation {
    fn from_iter<I: IntoIterator<Item = (CompilePhase, String)>>(iter: I) -> Self {
        Self {
            outputs: iter.into_iter().collect(),
        }
    }
}

//! Node mapping entries and their phase-validity policies

use crate::shared::models::CompilePhase;

/// Token in a composite template replaced by the user postfix
pub const IS_REPLACED: &str = "#IS_REPLACED#";

/// Set of compile phases a default regex can be used on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhasePolicy {
    /// Only `PRINT_IDEAL` (also the DEFAULT target)
    IdealFixed,
    /// Every ideal phase
    AllIdeal,
    /// Ideal phases in which loops exist
    IdealWithLoops,
    /// Ideal phases in which counted loops exist
    IdealWithCountedLoops,
    /// Inclusive ordinal interval, plus `PRINT_IDEAL`
    Range { from: CompilePhase, to: CompilePhase },
    /// Only `PRINT_OPTO_ASSEMBLY`
    OptoOnly,
    /// Ideal regex on `from..=to`, separate opto regex on `PRINT_OPTO_ASSEMBLY`
    IdealAndOpto { from: CompilePhase, to: CompilePhase },
}

impl PhasePolicy {
    /// Phase a DEFAULT rule is matched on
    pub fn default_phase(self) -> CompilePhase {
        match self {
            PhasePolicy::OptoOnly | PhasePolicy::IdealAndOpto { .. } => CompilePhase::PrintOptoAssembly,
            _ => CompilePhase::PrintIdeal,
        }
    }

    fn covers_ideal(self, phase: CompilePhase) -> bool {
        match self {
            PhasePolicy::IdealFixed => phase == CompilePhase::PrintIdeal,
            PhasePolicy::AllIdeal => phase.is_ideal(),
            PhasePolicy::IdealWithLoops => phase.has_loops(),
            PhasePolicy::IdealWithCountedLoops => phase.has_counted_loops(),
            PhasePolicy::Range { from, to } => {
                phase.is_between(from, to) || phase == self.default_phase()
            }
            PhasePolicy::OptoOnly => false,
            PhasePolicy::IdealAndOpto { from, to } => phase.is_between(from, to),
        }
    }

    fn covers_opto(self, phase: CompilePhase) -> bool {
        phase == CompilePhase::PrintOptoAssembly
            && matches!(self, PhasePolicy::OptoOnly | PhasePolicy::IdealAndOpto { .. })
    }
}

/// Default regex(es) of one IR node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeMapEntry {
    policy: PhasePolicy,
    regex: String,
    /// Separate regex for `PRINT_OPTO_ASSEMBLY` (`IdealAndOpto` only)
    opto_regex: Option<String>,
}

impl NodeMapEntry {
    pub fn new(policy: PhasePolicy, regex: impl Into<String>) -> Self {
        Self {
            policy,
            regex: regex.into(),
            opto_regex: None,
        }
    }

    pub fn ideal_and_opto(
        from: CompilePhase,
        to: CompilePhase,
        ideal_regex: impl Into<String>,
        opto_regex: impl Into<String>,
    ) -> Self {
        Self {
            policy: PhasePolicy::IdealAndOpto { from, to },
            regex: ideal_regex.into(),
            opto_regex: Some(opto_regex.into()),
        }
    }

    pub fn policy(&self) -> PhasePolicy {
        self.policy
    }

    pub fn default_phase(&self) -> CompilePhase {
        self.policy.default_phase()
    }

    /// `None` when the node has no regex on `phase`. DEFAULT resolves
    /// through the default phase.
    pub fn regex_for(&self, phase: CompilePhase) -> Option<&str> {
        if phase == CompilePhase::Default {
            return self.regex_for(self.default_phase());
        }
        if self.policy.covers_opto(phase) {
            return Some(self.opto_regex.as_deref().unwrap_or(&self.regex));
        }
        if self.policy.covers_ideal(phase) {
            return Some(&self.regex);
        }
        None
    }

    /// Template requires a user postfix
    pub fn is_composite(&self) -> bool {
        self.regex.contains(IS_REPLACED)
            || self.opto_regex.as_deref().is_some_and(|r| r.contains(IS_REPLACED))
    }

    /// Concrete phases with a regex, in phase order
    pub fn valid_phases(&self) -> Vec<CompilePhase> {
        CompilePhase::ALL
            .iter()
            .copied()
            .filter(|p| *p != CompilePhase::Default && self.regex_for(*p).is_some())
            .collect()
    }
}

//! One declared IR rule

use crate::features::matching::domain::phase_rule::CompilePhaseIrRule;
use crate::features::reporting::IrRuleMatchResult;
use crate::shared::models::Compilation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrRule {
    rule_id: usize,
    annotation: String,
    /// Sorted by phase, one entry per phase
    phase_rules: Vec<CompilePhaseIrRule>,
}

impl IrRule {
    pub fn new(rule_id: usize, annotation: impl Into<String>, mut phase_rules: Vec<CompilePhaseIrRule>) -> Self {
        phase_rules.sort_by_key(CompilePhaseIrRule::phase);
        phase_rules.dedup_by_key(|r| r.phase());
        Self {
            rule_id,
            annotation: annotation.into(),
            phase_rules,
        }
    }

    pub fn rule_id(&self) -> usize {
        self.rule_id
    }

    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    pub fn phase_rules(&self) -> &[CompilePhaseIrRule] {
        &self.phase_rules
    }

    pub fn apply(&self, compilation: &Compilation) -> Option<IrRuleMatchResult> {
        let phases: Vec<_> = self
            .phase_rules
            .iter()
            .filter_map(|rule| rule.apply(compilation))
            .collect();
        (!phases.is_empty()).then(|| IrRuleMatchResult {
            rule_id: self.rule_id,
            annotation: self.annotation.clone(),
            phases,
        })
    }
}

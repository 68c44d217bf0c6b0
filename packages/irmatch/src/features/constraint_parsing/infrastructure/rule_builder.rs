//! Resolves rule declarations into matchable IR rules
//!
//! Placeholders are replaced by the default regex of the phase they are
//! matched on. For a DEFAULT phase every placeholder goes to its own default
//! phase, so one declared rule may turn into several phase rules.

use crate::errors::{FormatError, FormatErrorKind};
use crate::features::constraint_parsing::domain::{IrRuleDeclaration, MethodDeclaration, RawConstraint};
use crate::features::constraint_parsing::infrastructure::reader::CheckAttributeReader;
use crate::features::matching::{CheckAttribute, CompilePhaseIrRule, Constraint, IrMethod, IrRule};
use crate::features::node_mappings::{NodeMappingTable, IS_REPLACED};
use crate::features::reporting::CheckAttributeKind;
use crate::shared::models::{CompilePhase, Comparison};
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// Resolved failOn and counts constraints of one phase
#[derive(Default)]
struct PhaseConstraints {
    fail_on: Vec<Constraint>,
    counts: Vec<Constraint>,
}

impl PhaseConstraints {
    fn into_rule(self, phase: CompilePhase) -> CompilePhaseIrRule {
        CompilePhaseIrRule::new(
            phase,
            CheckAttribute::non_empty(CheckAttributeKind::FailOn, self.fail_on),
            CheckAttribute::non_empty(CheckAttributeKind::Counts, self.counts),
        )
    }
}

pub struct IrRuleBuilder<'t> {
    table: &'t NodeMappingTable,
}

impl<'t> IrRuleBuilder<'t> {
    pub fn new(table: &'t NodeMappingTable) -> Self {
        Self { table }
    }

    /// Resolve every rule of `method`; rule ids start at 1
    ///
    /// The compilation is attached once the log has been parsed.
    pub fn build_method(&self, method: &MethodDeclaration) -> Result<IrMethod, FormatError> {
        let rules = method
            .rules
            .iter()
            .enumerate()
            .map(|(i, rule)| self.build(&method.name, i + 1, rule))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(IrMethod::new(method.name.clone(), rules, None))
    }

    pub fn build(
        &self,
        method: &str,
        rule_id: usize,
        declaration: &IrRuleDeclaration,
    ) -> Result<IrRule, FormatError> {
        self.resolve(method, rule_id, declaration)
            .map_err(|e| e.in_rule(method, rule_id))
    }

    fn resolve(
        &self,
        method: &str,
        rule_id: usize,
        declaration: &IrRuleDeclaration,
    ) -> Result<IrRule, FormatError> {
        let phases = declaration.effective_phases();
        let distinct: HashSet<_> = phases.iter().collect();
        if distinct.len() != phases.len() {
            return Err(FormatError::new(
                FormatErrorKind::DuplicatePhase,
                "Cannot specify a compile phase twice",
            ));
        }

        let fail_on = CheckAttributeReader::new(CheckAttributeKind::FailOn, &declaration.fail_on).read()?;
        let counts = CheckAttributeReader::new(CheckAttributeKind::Counts, &declaration.counts).read()?;

        let mut phase_rules: Vec<CompilePhaseIrRule> = Vec::new();
        for phase in phases {
            let resolved = if phase == CompilePhase::Default {
                self.resolve_default(&fail_on, &counts)?
            } else {
                let mut constraints = PhaseConstraints::default();
                for raw in &fail_on {
                    constraints.fail_on.push(self.constraint(CheckAttributeKind::FailOn, raw, phase)?);
                }
                for raw in &counts {
                    constraints.counts.push(self.constraint(CheckAttributeKind::Counts, raw, phase)?);
                }
                vec![constraints.into_rule(phase)]
            };

            for rule in resolved {
                match phase_rules.iter().find(|r| r.phase() == rule.phase()) {
                    Some(kept) if *kept != rule => warn!(
                        method,
                        rule_id,
                        phase = rule.phase().name(),
                        "Phase reached twice with different constraints, keeping the first"
                    ),
                    Some(_) => {}
                    None => phase_rules.push(rule),
                }
            }
        }

        Ok(IrRule::new(rule_id, declaration.display_annotation(), phase_rules))
    }

    /// Group constraints by the default phase of their placeholder
    fn resolve_default(
        &self,
        fail_on: &[RawConstraint],
        counts: &[RawConstraint],
    ) -> Result<Vec<CompilePhaseIrRule>, FormatError> {
        let mut by_phase: BTreeMap<CompilePhase, PhaseConstraints> = BTreeMap::new();
        for (kind, raws) in [(CheckAttributeKind::FailOn, fail_on), (CheckAttributeKind::Counts, counts)] {
            for raw in raws {
                let phase = self.default_phase(raw).map_err(|e| e.at_constraint(kind, raw.index))?;
                let constraint = self.constraint(kind, raw, phase)?;
                let constraints = by_phase.entry(phase).or_default();
                match kind {
                    CheckAttributeKind::FailOn => constraints.fail_on.push(constraint),
                    CheckAttributeKind::Counts => constraints.counts.push(constraint),
                }
            }
        }
        Ok(by_phase
            .into_iter()
            .map(|(phase, constraints)| constraints.into_rule(phase))
            .collect())
    }

    /// Literal regexes have no default phase
    fn default_phase(&self, raw: &RawConstraint) -> Result<CompilePhase, FormatError> {
        if !raw.is_placeholder() {
            return Err(FormatError::no_default_phase(&raw.node));
        }
        self.table.default_phase(&raw.node)
    }

    fn constraint(
        &self,
        kind: CheckAttributeKind,
        raw: &RawConstraint,
        phase: CompilePhase,
    ) -> Result<Constraint, FormatError> {
        self.resolve_constraint(raw, phase)
            .map_err(|e| e.at_constraint(kind, raw.index))
    }

    fn resolve_constraint(&self, raw: &RawConstraint, phase: CompilePhase) -> Result<Constraint, FormatError> {
        let pattern = self.pattern(raw, phase)?;
        match &raw.count {
            None => Constraint::fail_on(raw.index, pattern, phase),
            Some(count) => {
                let comparison = Comparison::parse(count)
                    .map_err(|e| FormatError::new(e.kind, format!("{}, node \"{}\"", e.message, raw.node)))?;
                Constraint::counts(raw.index, pattern, phase, comparison)
            }
        }
    }

    /// Literal regexes are used as written. Composite postfixes are checked
    /// by the attribute reader.
    fn pattern(&self, raw: &RawConstraint, phase: CompilePhase) -> Result<String, FormatError> {
        if !raw.is_placeholder() {
            return Ok(raw.node.clone());
        }

        let template = self.table.regex_for(&raw.node, phase)?;
        Ok(match &raw.user_postfix {
            Some(postfix) => template.replace(IS_REPLACED, postfix),
            None => template.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::node_mappings::ir_node::{ALLOC, ALLOC_OF, LOAD_I, LOOP, STORE_I, STORE_I_OF_CLASS};
    use crate::features::node_mappings::regexes;

    fn build(declaration: IrRuleDeclaration) -> Result<IrRule, FormatError> {
        let table = NodeMappingTable::new();
        IrRuleBuilder::new(&table).build("test1", 1, &declaration)
    }

    fn phases(rule: &IrRule) -> Vec<CompilePhase> {
        rule.phase_rules().iter().map(|r| r.phase()).collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Explicit phases
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_explicit_phase_resolves_placeholder() {
        let rule = build(
            IrRuleDeclaration::new()
                .with_phase(CompilePhase::AfterParsing)
                .with_fail_on([STORE_I]),
        )
        .unwrap();

        assert_eq!(phases(&rule), vec![CompilePhase::AfterParsing]);
        let constraint = &rule.phase_rules()[0].fail_on().unwrap().constraints()[0];
        assert_eq!(constraint.pattern(), regexes::ideal("StoreI"));
        assert!(rule.phase_rules()[0].counts().is_none());
    }

    #[test]
    fn test_literal_regex_kept() {
        let rule = build(
            IrRuleDeclaration::new()
                .with_phase(CompilePhase::PrintOptoAssembly)
                .with_counts(["call,static.*foo", ">= 1"]),
        )
        .unwrap();

        let constraint = &rule.phase_rules()[0].counts().unwrap().constraints()[0];
        assert_eq!(constraint.pattern(), "call,static.*foo");
    }

    #[test]
    fn test_composite_substitution() {
        let rule = build(
            IrRuleDeclaration::new()
                .with_phase(CompilePhase::PrintIdeal)
                .with_fail_on([STORE_I_OF_CLASS, "MyClass"]),
        )
        .unwrap();

        let pattern = rule.phase_rules()[0].fail_on().unwrap().constraints()[0].pattern().to_string();
        assert!(pattern.contains("MyClass"));
        assert!(!pattern.contains(IS_REPLACED));
    }

    #[test]
    fn test_phase_outside_policy() {
        let err = build(
            IrRuleDeclaration::new()
                .with_phase(CompilePhase::AfterParsing)
                .with_fail_on([LOOP]),
        )
        .unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::NoRegexForPhase);
        assert_eq!(err.method.as_deref(), Some("test1"));
        assert_eq!(err.rule_id, Some(1));
    }

    #[test]
    fn test_duplicate_phase() {
        let err = build(
            IrRuleDeclaration::new()
                .with_phase(CompilePhase::PrintIdeal)
                .with_phase(CompilePhase::PrintIdeal)
                .with_fail_on([STORE_I]),
        )
        .unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::DuplicatePhase);
        assert!(err.message.contains("Cannot specify a compile phase twice"));
    }

    #[test]
    fn test_malformed_count() {
        let err = build(IrRuleDeclaration::new().with_counts([LOAD_I, "-1"])).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::MalformedComparison);
        assert!(err.message.contains(LOAD_I));
    }

    #[test]
    fn test_undefined_placeholder() {
        let err = build(IrRuleDeclaration::new().with_fail_on(["_#NO_SUCH_NODE#_"])).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::UndefinedPlaceholder);
    }

    #[test]
    fn test_error_names_attribute_and_constraint() {
        let err = build(IrRuleDeclaration::new().with_fail_on([STORE_I, "_#NO_SUCH#_"])).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::UndefinedPlaceholder);
        assert_eq!(err.constraint, Some((CheckAttributeKind::FailOn, 2)));
        assert!(err.message.contains("failOn constraint 2"));
        assert!(err.message.contains("@IR rule 1"));

        let err = build(
            IrRuleDeclaration::new()
                .with_phase(CompilePhase::AfterParsing)
                .with_fail_on([STORE_I, LOOP]),
        )
        .unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::NoRegexForPhase);
        assert!(err.message.contains("failOn constraint 2"));
    }

    #[test]
    fn test_counts_errors_name_counts_constraint() {
        let err = build(IrRuleDeclaration::new().with_counts([STORE_I, "1", "LoadI", "2"])).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::NoDefaultPhase);
        assert_eq!(err.constraint, Some((CheckAttributeKind::Counts, 2)));

        let err = build(IrRuleDeclaration::new().with_counts([LOAD_I, "<> 3"])).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::MalformedComparison);
        assert!(err.message.contains("counts constraint 1"));
    }

    #[test]
    fn test_invalid_literal_regex() {
        let err = build(
            IrRuleDeclaration::new()
                .with_phase(CompilePhase::PrintIdeal)
                .with_fail_on(["(unbalanced"]),
        )
        .unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::InvalidRegex);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // DEFAULT phase
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_default_splits_by_node_default_phase() {
        let rule = build(
            IrRuleDeclaration::new()
                .with_fail_on([ALLOC_OF, "MyClass"])
                .with_counts([STORE_I, "1", ALLOC, "0"]),
        )
        .unwrap();

        assert_eq!(
            phases(&rule),
            vec![CompilePhase::PrintIdeal, CompilePhase::PrintOptoAssembly]
        );
        let ideal = &rule.phase_rules()[0];
        assert!(ideal.fail_on().is_none());
        assert_eq!(ideal.counts().unwrap().constraints()[0].index(), 1);

        let opto = &rule.phase_rules()[1];
        assert_eq!(opto.fail_on().unwrap().constraints().len(), 1);
        assert_eq!(opto.counts().unwrap().constraints()[0].index(), 2);
    }

    #[test]
    fn test_default_rejects_literal_regex() {
        let err = build(IrRuleDeclaration::new().with_fail_on(["StoreI"])).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::NoDefaultPhase);
    }

    #[test]
    fn test_default_and_explicit_collapse() {
        let rule = build(
            IrRuleDeclaration::new()
                .with_phase(CompilePhase::Default)
                .with_phase(CompilePhase::PrintIdeal)
                .with_fail_on([STORE_I]),
        )
        .unwrap();
        assert_eq!(phases(&rule), vec![CompilePhase::PrintIdeal]);
    }

    #[test]
    fn test_build_method_numbers_rules() {
        let table = NodeMappingTable::new();
        let method = MethodDeclaration::new(
            "test1",
            vec![
                IrRuleDeclaration::new().with_fail_on([STORE_I]),
                IrRuleDeclaration::new().with_counts([LOAD_I, "2"]),
            ],
        );
        let ir_method = IrRuleBuilder::new(&table).build_method(&method).unwrap();
        let ids: Vec<_> = ir_method.rules().iter().map(|r| r.rule_id()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(ir_method.rules()[0].annotation(), "@IR(failOn = {\"_#STORE_I#_\"})");
    }
}

//! Machine-readable failure report

use crate::features::reporting::domain::result::{CheckAttributeKind, TestClassResult};
use crate::features::reporting::domain::visitor::{walk_pre_order, FailCountVisitor, MatchResultNode, MatchResultVisitor};
use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct JsonReport {
    pub failed_methods: usize,
    pub failed_rules: usize,
    pub methods: Vec<JsonMethod>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonMethod {
    pub method: String,
    pub compiled: bool,
    pub failed_rules: usize,
    pub rules: Vec<JsonRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonRule {
    pub rule_id: usize,
    pub annotation: String,
    pub phases: Vec<JsonPhase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonPhase {
    /// `SCREAMING_SNAKE_CASE` name
    pub phase: String,
    pub description: String,
    pub no_compilation_output: bool,
    pub check_attributes: Vec<JsonCheckAttribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonCheckAttribute {
    pub kind: CheckAttributeKind,
    pub failed_constraints: usize,
    /// Empty when matched nodes are excluded
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<JsonConstraint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonConstraint {
    pub index: usize,
    pub regex: String,
    pub found: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    pub matched_nodes: Vec<String>,
}

/// Builds a [`JsonReport`] from a result tree
#[derive(Debug)]
pub struct JsonReportBuilder {
    include_matched_nodes: bool,
    report: JsonReport,
}

impl JsonReportBuilder {
    pub fn new(include_matched_nodes: bool) -> Self {
        Self {
            include_matched_nodes,
            report: JsonReport::default(),
        }
    }

    pub fn report(mut self, result: &TestClassResult) -> JsonReport {
        walk_pre_order(result, &mut self);
        self.report
    }

    pub fn build(self, result: &TestClassResult) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.report(result))
    }

    fn current_rule(&mut self) -> Option<&mut JsonRule> {
        self.report.methods.last_mut().and_then(|m| m.rules.last_mut())
    }

    fn current_phase(&mut self) -> Option<&mut JsonPhase> {
        self.current_rule().and_then(|r| r.phases.last_mut())
    }

    fn current_attribute(&mut self) -> Option<&mut JsonCheckAttribute> {
        self.current_phase().and_then(|p| p.check_attributes.last_mut())
    }
}

impl MatchResultVisitor for JsonReportBuilder {
    fn should_visit(&mut self, node: &MatchResultNode<'_>) -> bool {
        self.include_matched_nodes || !matches!(node, MatchResultNode::FailOn(_) | MatchResultNode::Counts(_))
    }

    fn visit(&mut self, node: MatchResultNode<'_>) {
        match node {
            MatchResultNode::TestClass(r) => {
                let counts = FailCountVisitor::count(r);
                self.report.failed_methods = counts.methods;
                self.report.failed_rules = counts.rules;
            }
            MatchResultNode::Method(r) => self.report.methods.push(JsonMethod {
                method: r.method.clone(),
                compiled: true,
                failed_rules: r.rules.len(),
                rules: Vec::new(),
            }),
            MatchResultNode::NotCompiled(r) => self.report.methods.push(JsonMethod {
                method: r.method.clone(),
                compiled: false,
                failed_rules: r.rule_count,
                rules: Vec::new(),
            }),
            MatchResultNode::Rule(r) => {
                if let Some(method) = self.report.methods.last_mut() {
                    method.rules.push(JsonRule {
                        rule_id: r.rule_id,
                        annotation: r.annotation.clone(),
                        phases: Vec::new(),
                    });
                }
            }
            MatchResultNode::Phase(r) => {
                if let Some(rule) = self.current_rule() {
                    rule.phases.push(JsonPhase {
                        phase: r.phase.name().to_string(),
                        description: r.phase.description().to_string(),
                        no_compilation_output: r.no_compilation_output,
                        check_attributes: Vec::new(),
                    });
                }
            }
            MatchResultNode::CheckAttribute(r) => {
                if let Some(phase) = self.current_phase() {
                    phase.check_attributes.push(JsonCheckAttribute {
                        kind: r.kind,
                        failed_constraints: r.failures.len(),
                        constraints: Vec::new(),
                    });
                }
            }
            MatchResultNode::FailOn(f) => {
                if let Some(attribute) = self.current_attribute() {
                    attribute.constraints.push(JsonConstraint {
                        index: f.index,
                        regex: f.pattern.clone(),
                        found: f.matched_nodes.len(),
                        expected: None,
                        matched_nodes: f.matched_nodes.clone(),
                    });
                }
            }
            MatchResultNode::Counts(f) => {
                if let Some(attribute) = self.current_attribute() {
                    attribute.constraints.push(JsonConstraint {
                        index: f.index,
                        regex: f.pattern.clone(),
                        found: f.found(),
                        expected: Some(f.comparison.to_string()),
                        matched_nodes: f.matched_nodes.clone(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reporting::domain::result::*;
    use crate::shared::models::{Compilation, CompilePhase, Comparison};
    use serde_json::{json, Value};

    fn sample() -> TestClassResult {
        let phase = CompilePhaseMatchResult::checked(
            CompilePhase::PrintIdeal,
            vec![CheckAttributeMatchResult {
                kind: CheckAttributeKind::Counts,
                failures: vec![ConstraintFailure::Counts(CountsConstraintFailure {
                    index: 1,
                    pattern: "StoreI".into(),
                    matched_nodes: vec!["StoreI".into(), "StoreI".into()],
                    comparison: Comparison::parse("<= 1").unwrap(),
                })],
            }],
        )
        .unwrap();
        TestClassResult::new(vec![
            IrMethodResult::Matched(IrMethodMatchResult {
                method: "test1".into(),
                rules: vec![IrRuleMatchResult {
                    rule_id: 1,
                    annotation: "@IR".into(),
                    phases: vec![phase],
                }],
                compilation: Compilation::default(),
            }),
            IrMethodResult::NotCompiled(NotCompiledResult {
                method: "test2".into(),
                rule_count: 2,
            }),
        ])
    }

    #[test]
    fn test_json_shape() {
        let json: Value = serde_json::from_str(&JsonReportBuilder::new(true).build(&sample()).unwrap()).unwrap();

        assert_eq!(json["failed_methods"], 2);
        assert_eq!(json["failed_rules"], 3);
        assert_eq!(json["methods"][1], json!({
            "method": "test2",
            "compiled": false,
            "failed_rules": 2,
            "rules": []
        }));

        let phase = &json["methods"][0]["rules"][0]["phases"][0];
        assert_eq!(phase["phase"], "PRINT_IDEAL");
        assert_eq!(phase["description"], "PrintIdeal");
        assert_eq!(phase["check_attributes"][0]["kind"], "counts");
        assert_eq!(
            phase["check_attributes"][0]["constraints"][0],
            json!({
                "index": 1,
                "regex": "StoreI",
                "found": 2,
                "expected": "<= 1",
                "matched_nodes": ["StoreI", "StoreI"]
            })
        );
    }

    #[test]
    fn test_without_matched_nodes() {
        let report = JsonReportBuilder::new(false).report(&sample());
        let attribute = &report.methods[0].rules[0].phases[0].check_attributes[0];
        assert_eq!(attribute.failed_constraints, 1);
        assert!(attribute.constraints.is_empty());
    }
}

//! Matching against log, rule and config files on disk

mod common;

use common::*;
use irmatch::ir_node::STORE_I;
use irmatch::{IrMatchError, IrMatcher, IrRuleDeclaration, MatchVerdict, MatcherConfig, MethodDeclaration, NodeMappingTable, ReportFormat, RuleFile};
use pretty_assertions::assert_eq;
use serde_json::Value;

fn forbid_store() -> Vec<MethodDeclaration> {
    vec![MethodDeclaration::new("test1", vec![IrRuleDeclaration::new().with_fail_on([STORE_I])])]
}

// ═══════════════════════════════════════════════════════════════════════════
// Log files
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_run_on_log_file() {
    let log = write_temp(&(task_queued(5, "test1") + &noise() + &print_ideal(5, &load_i(11))));
    let table = NodeMappingTable::new();
    let verdict = IrMatcher::new(&table, MatcherConfig::default())
        .run(log.path(), TEST_CLASS, &forbid_store())
        .unwrap();
    assert_eq!(verdict, MatchVerdict::Passed);
}

#[test]
fn test_verify_turns_failure_into_error() {
    let log = write_temp(&(task_queued(5, "test1") + &print_ideal(5, &store_i(11))));
    let table = NodeMappingTable::new();
    let matcher = IrMatcher::new(&table, MatcherConfig::default());

    let err = matcher.verify(log.path(), TEST_CLASS, &forbid_store()).unwrap_err();
    let IrMatchError::Violation(violation) = &err else {
        panic!("expected violation, got {err}");
    };
    assert_eq!(err.to_string(), violation.report);
    assert_eq!(violation.failed_methods, 1);
}

#[test]
fn test_verify_accepts_bailout() {
    let body = store_i(11) + "<!-- safepoint while printing -->\n";
    let log = write_temp(&(task_queued(5, "test1") + &print_ideal(5, &body)));
    let table = NodeMappingTable::new();
    let matcher = IrMatcher::new(&table, MatcherConfig::default());
    assert!(matcher.verify(log.path(), TEST_CLASS, &forbid_store()).is_ok());

    let strict = IrMatcher::new(&table, MatcherConfig::default().safepoint_bailout(false));
    assert!(strict.verify(log.path(), TEST_CLASS, &forbid_store()).is_err());
}

#[test]
fn test_missing_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hotspot_pid1.log");
    let table = NodeMappingTable::new();
    let err = IrMatcher::new(&table, MatcherConfig::default())
        .run(&path, TEST_CLASS, &forbid_store())
        .unwrap_err();
    assert!(matches!(err, IrMatchError::Io { .. }));
    assert!(err.to_string().contains("hotspot_pid1.log"));
}

#[test]
fn test_corrupted_log_file() {
    let log = write_temp(&(task_queued(5, "test1") + "<ideal compile_phase='PrintIdeal'>\n" + &store_i(11)));
    let table = NodeMappingTable::new();
    let err = IrMatcher::new(&table, MatcherConfig::default())
        .run(log.path(), TEST_CLASS, &forbid_store())
        .unwrap_err();
    let IrMatchError::FileCorrupted { file, line } = err else {
        panic!("expected corrupted file error");
    };
    assert_eq!(file, log.path().display().to_string());
    assert!(line.starts_with("<ideal"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Rule and config files
// ═══════════════════════════════════════════════════════════════════════════

const RULES: &str = r#"
version: 1
test_class: compiler.c2.irTests.TestBasics
methods:
  - name: test1
    rules:
      - fail_on: ["_#STORE_I#_"]
      - phase: [PRINT_IDEAL]
        counts: ["_#LOAD_I#_", ">= 1"]
  - name: test2
    rules:
      - fail_on: ["_#STORE_I#_"]
  - name: helper
"#;

const CONFIG: &str = r#"
version: 1
report_format: json
include_matched_nodes: true
"#;

#[test]
fn test_rule_and_config_files_end_to_end() {
    let rules_file = write_temp(RULES);
    let config_file = write_temp(CONFIG);
    let log = write_temp(&(task_queued(5, "test1") + &print_ideal(5, &(store_i(11) + &store_i(12)))));

    let rules = RuleFile::from_yaml(rules_file.path()).unwrap();
    assert_eq!(rules.method_names(), vec!["test1", "test2", "helper"]);
    let config = MatcherConfig::from_yaml(config_file.path()).unwrap();
    assert_eq!(config.report_format, ReportFormat::Json);

    let table = NodeMappingTable::new();
    let MatchVerdict::Failed(violation) = IrMatcher::new(&table, config).run_rule_file(log.path(), &rules).unwrap() else {
        panic!("expected failure");
    };

    let json: Value = serde_json::from_str(&violation.report).unwrap();
    assert_eq!(json["failed_methods"], 2);
    assert_eq!(json["failed_rules"], 3);

    let test1 = &json["methods"][0];
    assert_eq!(test1["method"], "test1");
    assert_eq!(test1["compiled"], true);
    assert_eq!(test1["failed_rules"], 2);
    let fail_on = &test1["rules"][0]["phases"][0]["check_attributes"][0];
    assert_eq!(fail_on["kind"], "failOn");
    assert_eq!(fail_on["constraints"][0]["found"], 2);
    let counts = &test1["rules"][1]["phases"][0];
    assert_eq!(counts["phase"], "PRINT_IDEAL");
    assert_eq!(counts["check_attributes"][0]["constraints"][0]["expected"], ">= 1");

    let test2 = &json["methods"][1];
    assert_eq!(test2["method"], "test2");
    assert_eq!(test2["compiled"], false);
}

#[test]
fn test_rule_file_with_unknown_phase() {
    let yaml = "test_class: a.B\nmethods:\n  - name: m\n    rules:\n      - phase: [NOT_A_PHASE]\n        fail_on: [x]\n";
    assert!(RuleFile::from_yaml_str(yaml).is_err());
}

#[test]
fn test_rule_file_format_error_surfaces() {
    let yaml = "test_class: compiler.c2.irTests.TestBasics\nmethods:\n  - name: test1\n    rules:\n      - fail_on: [\"_#NO_SUCH_NODE#_\"]\n";
    let rules = RuleFile::from_yaml_str(yaml).unwrap();
    let log = write_temp(&task_queued(5, "test1"));
    let table = NodeMappingTable::new();
    let err = IrMatcher::new(&table, MatcherConfig::default())
        .run_rule_file(log.path(), &rules)
        .unwrap_err();
    let IrMatchError::Format(format) = err else {
        panic!("expected format error");
    };
    assert_eq!(format.kind, irmatch::FormatErrorKind::UndefinedPlaceholder);
    assert_eq!(format.rule_id, Some(1));
}

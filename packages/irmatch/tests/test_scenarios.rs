//! End-to-end matching scenarios

mod common;

use common::*;
use irmatch::features::reporting::{ConstraintFailure, IrMethodResult};
use irmatch::ir_node::STORE_I;
use irmatch::{CompilePhase, IrRuleDeclaration, MatchVerdict, MethodDeclaration};
use pretty_assertions::assert_eq;

fn forbid_store(rule: IrRuleDeclaration) -> Vec<MethodDeclaration> {
    vec![MethodDeclaration::new("test1", vec![rule.with_fail_on([STORE_I])])]
}

// ═══════════════════════════════════════════════════════════════════════════
// DEFAULT phase
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_default_phase_without_occurrence_passes() {
    let log = task_queued(42, "test1") + &print_ideal(42, &(load_i(11) + &return_node(12)));
    let verdict = run_log(&log, &forbid_store(IrRuleDeclaration::new()));
    assert_eq!(verdict, MatchVerdict::Passed);
}

#[test]
fn test_default_phase_two_matches() {
    let log = task_queued(42, "test1")
        + &noise()
        + &print_ideal(42, &(store_i(24) + &load_i(25) + &store_i(26)));
    let MatchVerdict::Failed(violation) = run_log(&log, &forbid_store(IrRuleDeclaration::new())) else {
        panic!("expected failure");
    };

    let IrMethodResult::Matched(method) = &violation.result.methods[0] else {
        panic!("expected matched method");
    };
    let phase = &method.rules[0].phases[0];
    assert_eq!(phase.phase, CompilePhase::PrintIdeal);
    let failures = &phase.check_attributes[0].failures;
    assert_eq!(failures.len(), 1);
    let ConstraintFailure::FailOn(failure) = &failures[0] else {
        panic!("expected failOn failure");
    };
    assert_eq!(failure.matched_nodes.len(), 2);
    assert!(failure.matched_nodes[0].starts_with("24  StoreI  === 5 7 23 8"));

    assert!(violation.report.contains("- Matched forbidden nodes (2):"));
    assert!(violation.report.contains("1) Method \"test1\" - [Failed IR rules: 1]:"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Missing output
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_phase_never_emitted() {
    let log = task_queued(42, "test1") + &print_ideal(42, &load_i(11));
    let rule = IrRuleDeclaration::new().with_phase(CompilePhase::AfterParsing);
    let MatchVerdict::Failed(violation) = run_log(&log, &forbid_store(rule)) else {
        panic!("expected failure");
    };

    let IrMethodResult::Matched(method) = &violation.result.methods[0] else {
        panic!("expected matched method");
    };
    assert!(method.rules[0].phases[0].no_compilation_output);
    assert!(violation.report.contains(concat!(
        "     > Phase \"After Parsing\":\n",
        "       - NO compilation output found for this phase!"
    )));
}

#[test]
fn test_method_not_in_log() {
    let log = task_queued(42, "test1") + &print_ideal(42, &load_i(11));
    let methods = vec![
        MethodDeclaration::new("test1", vec![IrRuleDeclaration::new().with_fail_on([STORE_I])]),
        MethodDeclaration::new(
            "test2",
            vec![
                IrRuleDeclaration::new().with_fail_on([STORE_I]),
                IrRuleDeclaration::new().with_counts([STORE_I, "1"]),
            ],
        ),
    ];
    let MatchVerdict::Failed(violation) = run_log(&log, &methods) else {
        panic!("expected failure");
    };

    assert_eq!(violation.failed_methods, 1);
    assert_eq!(violation.failed_rules, 2);
    assert!(matches!(&violation.result.methods[0], IrMethodResult::NotCompiled(r) if r.method == "test2"));

    let expected = concat!(
        "One or more @IR rules failed:\n",
        "\n",
        "Failed IR Rules (2) of Methods (1)\n",
        "----------------------------------\n",
        "1) Method \"test2\":\n",
        "   * Method was not compiled. Did you specify any compiler directives preventing a compilation ",
        "or used a @Run method in STANDALONE mode? In the latter case, make sure to always trigger a C2 ",
        "compilation by invoking the test enough times.\n",
        "\n",
        ">>> Check stdout for compilation output of the failed methods\n",
        "\n",
    );
    assert_eq!(violation.report, expected);
}

// ═══════════════════════════════════════════════════════════════════════════
// Safepoint
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_safepoint_marker_bails_out() {
    let body = store_i(24) + "<!-- safepoint while printing -->\n" + &load_i(25);
    let log = task_queued(42, "test1") + &print_ideal(42, &body);
    let verdict = run_log(&log, &forbid_store(IrRuleDeclaration::new()));
    assert!(matches!(verdict, MatchVerdict::Bailout { .. }));
}

#[test]
fn test_safepoint_marker_outside_checked_phase() {
    // The marker only counts when it is part of the dumped failing output
    let log = task_queued(42, "test1")
        + &ideal_block(42, "After Parsing", "<!-- safepoint while printing -->\n")
        + &print_ideal(42, &store_i(24));
    let verdict = run_log(&log, &forbid_store(IrRuleDeclaration::new()));
    assert!(verdict.is_failed());
}

// ═══════════════════════════════════════════════════════════════════════════
// Full report
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_full_report_text() {
    let log = task_queued(7, "test1") + &print_ideal(7, &(store_i(24) + &load_i(25)));
    let methods = vec![MethodDeclaration::new(
        "test1",
        vec![IrRuleDeclaration::new()
            .with_phase(CompilePhase::PrintIdeal)
            .with_fail_on(["StoreI"])
            .with_counts(["LoadI", "2"])
            .with_annotation("@IR(failOn = \"StoreI\", counts = {\"LoadI\", \"2\"})")],
    )];
    let MatchVerdict::Failed(violation) = run_log(&log, &methods) else {
        panic!("expected failure");
    };

    let expected = concat!(
        "One or more @IR rules failed:\n",
        "\n",
        "Failed IR Rules (1) of Methods (1)\n",
        "----------------------------------\n",
        "1) Method \"test1\" - [Failed IR rules: 1]:\n",
        "   * @IR rule 1: \"@IR(failOn = \"StoreI\", counts = {\"LoadI\", \"2\"})\"\n",
        "     > Phase \"PrintIdeal\":\n",
        "       - failOn: Graph contains forbidden nodes:\n",
        "         * Constraint 1: \"StoreI\"\n",
        "           - Matched forbidden node:\n",
        "             * StoreI\n",
        "       - counts: Graph contains wrong number of nodes:\n",
        "         * Constraint 1: \"LoadI\"\n",
        "           - Failed comparison: [found] 1 = 2 [given]\n",
        "           - Matched node:\n",
        "             * LoadI\n",
        "\n",
        ">>> Check stdout for compilation output of the failed methods\n",
        "\n",
    );
    assert_eq!(violation.report, expected);

    let output = violation.compilation_output.unwrap();
    assert!(output.starts_with("Compilations (1) of Failed Methods (1)\n"));
    assert!(output.contains("1) Compilation of \"test1\":\n> Phase \"PrintIdeal\":\n"));
}

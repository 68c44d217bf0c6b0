//! End-to-end IR matching of one test class
//!
//! 1. Resolve every rule declaration (format errors abort before any log
//!    line is read)
//! 2. Parse the compilation log
//! 3. Match and build the failure-only result tree
//! 4. Render the report, or bail out if the VM interrupted its printing

use crate::config::{MatcherConfig, ReportFormat, RuleFile};
use crate::errors::{IrMatchError, Result};
use crate::features::constraint_parsing::{IrRuleBuilder, MethodDeclaration};
use crate::features::log_parsing::{CompilationLog, CompilationLogParser};
use crate::features::matching::{IrMethod, TestClass};
use crate::features::node_mappings::NodeMappingTable;
use crate::features::reporting::{
    CompilationOutputBuilder, FailCountVisitor, FailureMessageBuilder, JsonReportBuilder, TestClassResult,
};
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info};

/// Emitted by the VM when a safepoint interrupts a dump
pub const SAFEPOINT_WHILE_PRINTING: &str = "<!-- safepoint while printing -->";

/// Failed IR matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrViolation {
    /// Rendered in the configured report format
    pub report: String,
    /// `None` when excluded by the configuration
    pub compilation_output: Option<String>,
    pub failed_methods: usize,
    pub failed_rules: usize,
    pub result: TestClassResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchVerdict {
    Passed,
    /// Rules failed but the output was interrupted by a safepoint
    Bailout { report: String },
    Failed(IrViolation),
}

impl MatchVerdict {
    pub fn is_passed(&self) -> bool {
        matches!(self, MatchVerdict::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, MatchVerdict::Failed(_))
    }
}

pub struct IrMatcher<'t> {
    table: &'t NodeMappingTable,
    config: MatcherConfig,
}

impl<'t> IrMatcher<'t> {
    pub fn new(table: &'t NodeMappingTable, config: MatcherConfig) -> Self {
        Self { table, config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Match the log at `log_path` against the rules of `test_class`
    pub fn run(
        &self,
        log_path: impl AsRef<Path>,
        test_class: &str,
        methods: &[MethodDeclaration],
    ) -> Result<MatchVerdict> {
        let ir_methods = self.resolve(methods)?;
        let parser = self.parser(test_class, &ir_methods)?;
        let log = parser.parse_file(log_path)?;
        self.evaluate(ir_methods, log)
    }

    /// Same as [`run`](Self::run) on an already opened log
    pub fn run_reader<R: BufRead>(
        &self,
        reader: R,
        source_name: &str,
        test_class: &str,
        methods: &[MethodDeclaration],
    ) -> Result<MatchVerdict> {
        let ir_methods = self.resolve(methods)?;
        let parser = self.parser(test_class, &ir_methods)?;
        let log = parser.parse_reader(reader, source_name)?;
        self.evaluate(ir_methods, log)
    }

    pub fn run_rule_file(&self, log_path: impl AsRef<Path>, rules: &RuleFile) -> Result<MatchVerdict> {
        self.run(log_path, &rules.test_class, &rules.methods)
    }

    /// Passing and bailed out runs are `Ok`, failed rules become
    /// [`IrMatchError::Violation`]
    pub fn verify(
        &self,
        log_path: impl AsRef<Path>,
        test_class: &str,
        methods: &[MethodDeclaration],
    ) -> Result<()> {
        match self.run(log_path, test_class, methods)? {
            MatchVerdict::Passed | MatchVerdict::Bailout { .. } => Ok(()),
            MatchVerdict::Failed(violation) => Err(IrMatchError::Violation(Box::new(violation))),
        }
    }

    /// Methods without rules take no part in matching
    fn resolve(&self, methods: &[MethodDeclaration]) -> Result<Vec<IrMethod>> {
        let builder = IrRuleBuilder::new(self.table);
        let mut resolved = Vec::with_capacity(methods.len());
        for method in methods {
            if method.rules.is_empty() {
                debug!(method = %method.name, "Skipping method without IR rules");
                continue;
            }
            resolved.push(builder.build_method(method)?);
        }
        Ok(resolved)
    }

    fn parser(&self, test_class: &str, methods: &[IrMethod]) -> Result<CompilationLogParser> {
        let names: Vec<&str> = methods.iter().map(IrMethod::name).collect();
        CompilationLogParser::new(test_class, &names)
    }

    fn evaluate(&self, methods: Vec<IrMethod>, mut log: CompilationLog) -> Result<MatchVerdict> {
        let methods = methods
            .into_iter()
            .map(|method| {
                let compilation = log.take(method.name());
                method.with_compilation(compilation)
            })
            .collect();
        let result = TestClass::new(methods).apply();
        if !result.fail() {
            info!("All IR rules passed");
            return Ok(MatchVerdict::Passed);
        }

        let report = match self.config.report_format {
            ReportFormat::Text => FailureMessageBuilder::build(&result),
            ReportFormat::Json => JsonReportBuilder::new(self.config.include_matched_nodes).build(&result)?,
        };
        let compilation_output = CompilationOutputBuilder::build(&result);

        if self.config.safepoint_bailout && compilation_output.contains(SAFEPOINT_WHILE_PRINTING) {
            info!("Found {}, bail out of IR matching", SAFEPOINT_WHILE_PRINTING);
            return Ok(MatchVerdict::Bailout { report });
        }

        let counts = FailCountVisitor::count(&result);
        info!(
            failed_methods = counts.methods,
            failed_rules = counts.rules,
            "IR matching failed"
        );
        Ok(MatchVerdict::Failed(IrViolation {
            report,
            compilation_output: self.config.include_compilation_output.then_some(compilation_output),
            failed_methods: counts.methods,
            failed_rules: counts.rules,
            result,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::constraint_parsing::IrRuleDeclaration;
    use crate::features::node_mappings::ir_node::STORE_I;
    use std::io::Cursor;

    const CLASS: &str = "pkg.Test";

    fn log(body: &str) -> String {
        format!(
            "<task_queued compile_id='1' method='pkg/Test test1 ()V'/>\n\
             <ideal compile_id='1' compile_phase='PrintIdeal'>\n{}</ideal>\n",
            body
        )
    }

    fn methods() -> Vec<MethodDeclaration> {
        vec![MethodDeclaration::new(
            "test1",
            vec![IrRuleDeclaration::new().with_fail_on([STORE_I])],
        )]
    }

    fn run(config: MatcherConfig, body: &str) -> Result<MatchVerdict> {
        let table = NodeMappingTable::new();
        IrMatcher::new(&table, config).run_reader(Cursor::new(log(body)), "test.log", CLASS, &methods())
    }

    #[test]
    fn test_passed() {
        let verdict = run(MatcherConfig::default(), "10  LoadI  === 5 7\n").unwrap();
        assert!(verdict.is_passed());
    }

    #[test]
    fn test_failed() {
        let verdict = run(MatcherConfig::default(), "10  StoreI  === 5 7 8\n").unwrap();
        let MatchVerdict::Failed(violation) = verdict else {
            panic!("expected failure");
        };
        assert_eq!(violation.failed_methods, 1);
        assert_eq!(violation.failed_rules, 1);
        assert!(violation.report.starts_with("One or more @IR rules failed:"));
        assert!(violation.compilation_output.unwrap().contains("StoreI"));
    }

    #[test]
    fn test_safepoint_bailout() {
        let body = "10  StoreI  === 5 7 8\n<!-- safepoint while printing -->\n";
        let verdict = run(MatcherConfig::default(), body).unwrap();
        assert!(matches!(verdict, MatchVerdict::Bailout { .. }));

        let verdict = run(MatcherConfig::default().safepoint_bailout(false), body).unwrap();
        assert!(verdict.is_failed());
    }

    #[test]
    fn test_json_report() {
        let config = MatcherConfig::default().report_format(ReportFormat::Json);
        let MatchVerdict::Failed(violation) = run(config, "10  StoreI  === 5 7 8\n").unwrap() else {
            panic!("expected failure");
        };
        let json: serde_json::Value = serde_json::from_str(&violation.report).unwrap();
        assert_eq!(json["failed_methods"], 1);
    }

    #[test]
    fn test_compilation_output_excluded() {
        let config = MatcherConfig::default().include_compilation_output(false);
        let MatchVerdict::Failed(violation) = run(config, "10  StoreI  === 5 7 8\n").unwrap() else {
            panic!("expected failure");
        };
        assert!(violation.compilation_output.is_none());
    }

    #[test]
    fn test_format_error_before_log() {
        let table = NodeMappingTable::new();
        let methods = vec![MethodDeclaration::new(
            "test1",
            vec![IrRuleDeclaration::new().with_fail_on(["StoreI"])],
        )];
        // The log path does not exist: the format error must come first
        let err = IrMatcher::new(&table, MatcherConfig::default())
            .run("/nonexistent/hotspot.log", CLASS, &methods)
            .unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_methods_without_rules_skipped() {
        let table = NodeMappingTable::new();
        let methods = vec![MethodDeclaration::new("helper", vec![])];
        let verdict = IrMatcher::new(&table, MatcherConfig::default())
            .run_reader(Cursor::new(""), "empty.log", CLASS, &methods)
            .unwrap();
        assert!(verdict.is_passed());
    }
}

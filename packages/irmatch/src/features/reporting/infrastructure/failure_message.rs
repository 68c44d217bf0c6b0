//! Human-readable failure report
//!
//! ```text
//! One or more @IR rules failed:
//!
//! Failed IR Rules (1) of Methods (1)
//! ----------------------------------
//! 1) Method "test1" - [Failed IR rules: 1]:
//!    * @IR rule 1: "@IR(failOn = {_#STORE_I#_})"
//!      > Phase "PrintIdeal":
//!        - failOn: Graph contains forbidden nodes:
//!          * Constraint 1: "(\d+(\s){2}(StoreI.*)+(\s){2}===.*)"
//!            - Matched forbidden node:
//!              * 25  StoreI  === 5 7 24 [[ 12 ]]
//!
//! >>> Check stdout for compilation output of the failed methods
//! ```

use crate::features::reporting::domain::result::{CheckAttributeKind, TestClassResult};
use crate::features::reporting::domain::visitor::{walk_pre_order, FailCountVisitor, MatchResultNode, MatchResultVisitor};
use crate::shared::utils::indent;
use std::fmt::Write;

const NOT_COMPILED_MESSAGE: &str = "* Method was not compiled. Did you specify any compiler directives \
     preventing a compilation or used a @Run method in STANDALONE mode? In the latter case, make sure to \
     always trigger a C2 compilation by invoking the test enough times.";

const NO_OUTPUT_MESSAGE: &str = "- NO compilation output found for this phase! Make sure this phase is \
     emitted or remove it from the list of compile phases in the @IR rule to match on.";

const FOOTER: &str = ">>> Check stdout for compilation output of the failed methods";

#[derive(Debug, Default)]
pub struct FailureMessageBuilder {
    msg: String,
    method_number: usize,
    /// Column of the rule bullets of the current method
    indentation: usize,
}

impl FailureMessageBuilder {
    pub fn build(result: &TestClassResult) -> String {
        let mut builder = Self::default();
        walk_pre_order(result, &mut builder);
        builder.msg.push('\n');
        builder.msg.push_str(FOOTER);
        builder.msg.push_str("\n\n");
        builder.msg
    }

    fn append_header(&mut self, result: &TestClassResult) {
        let counts = FailCountVisitor::count(result);
        let separator = 32 + digit_count(counts.rules) + digit_count(counts.methods);
        self.msg.push_str("One or more @IR rules failed:\n\n");
        let _ = writeln!(
            self.msg,
            "Failed IR Rules ({}) of Methods ({})",
            counts.rules, counts.methods
        );
        self.msg.push_str(&"-".repeat(separator));
        self.msg.push('\n');
    }

    /// Not compiled methods carry no rule count
    fn append_method_header(&mut self, method: &str, failed_rules: Option<usize>) {
        if self.method_number > 0 {
            self.msg.push('\n');
        }
        self.method_number += 1;
        self.indentation = digit_count(self.method_number) + 2;
        let _ = write!(self.msg, "{}) Method \"{}\"", self.method_number, method);
        match failed_rules {
            Some(count) => {
                let _ = writeln!(self.msg, " - [Failed IR rules: {}]:", count);
            }
            None => self.msg.push_str(":\n"),
        }
    }

    fn append_constraint_header(&mut self, index: usize, pattern: &str) {
        let _ = writeln!(
            self.msg,
            "{}* Constraint {}: \"{}\"",
            indent(self.indentation + 6),
            index,
            pattern
        );
    }

    fn append_matched_nodes(&mut self, prefix: &str, nodes: &[String]) {
        let count = if nodes.len() > 1 {
            format!("s ({})", nodes.len())
        } else {
            String::new()
        };
        let _ = writeln!(self.msg, "{}- {} node{}:", indent(self.indentation + 8), prefix, count);

        let continuation = format!("\n{}", indent(self.indentation + 12));
        for node in nodes {
            let _ = writeln!(
                self.msg,
                "{}* {}",
                indent(self.indentation + 10),
                node.replace('\n', &continuation)
            );
        }
    }
}

impl MatchResultVisitor for FailureMessageBuilder {
    fn visit(&mut self, node: MatchResultNode<'_>) {
        match node {
            MatchResultNode::TestClass(r) => self.append_header(r),
            MatchResultNode::Method(r) => self.append_method_header(&r.method, Some(r.rules.len())),
            MatchResultNode::NotCompiled(r) => {
                self.append_method_header(&r.method, None);
                let _ = writeln!(self.msg, "{}{}", indent(self.indentation), NOT_COMPILED_MESSAGE);
            }
            MatchResultNode::Rule(r) => {
                let _ = writeln!(
                    self.msg,
                    "{}* @IR rule {}: \"{}\"",
                    indent(self.indentation),
                    r.rule_id,
                    r.annotation
                );
            }
            MatchResultNode::Phase(r) => {
                let _ = writeln!(
                    self.msg,
                    "{}> Phase \"{}\":",
                    indent(self.indentation + 2),
                    r.phase.description()
                );
                if r.no_compilation_output {
                    let _ = writeln!(self.msg, "{}{}", indent(self.indentation + 4), NO_OUTPUT_MESSAGE);
                }
            }
            MatchResultNode::CheckAttribute(r) => {
                let message = match r.kind {
                    CheckAttributeKind::FailOn => "failOn: Graph contains forbidden nodes",
                    CheckAttributeKind::Counts => "counts: Graph contains wrong number of nodes",
                };
                let _ = writeln!(self.msg, "{}- {}:", indent(self.indentation + 4), message);
            }
            MatchResultNode::FailOn(f) => {
                self.append_constraint_header(f.index, &f.pattern);
                self.append_matched_nodes("Matched forbidden", &f.matched_nodes);
            }
            MatchResultNode::Counts(f) => {
                self.append_constraint_header(f.index, &f.pattern);
                let _ = writeln!(
                    self.msg,
                    "{}- Failed comparison: [found] {} {} {} [given]",
                    indent(self.indentation + 8),
                    f.found(),
                    f.comparison.symbol(),
                    f.comparison.given()
                );
                if f.matched_nodes.is_empty() {
                    let _ = writeln!(self.msg, "{}- No nodes matched!", indent(self.indentation + 8));
                } else {
                    self.append_matched_nodes("Matched", &f.matched_nodes);
                }
            }
        }
    }
}

fn digit_count(n: usize) -> usize {
    n.to_string().len()
}

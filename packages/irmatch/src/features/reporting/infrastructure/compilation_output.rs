//! Raw compilation output of the failed methods

use crate::features::reporting::domain::result::TestClassResult;
use crate::features::reporting::domain::visitor::{walk_pre_order, MatchResultNode, MatchResultVisitor};
use crate::shared::models::{Compilation, CompilePhase};
use std::collections::BTreeSet;
use std::fmt::Write;

/// Dumps, per failed compiled method, the output of every phase a failed rule
/// was checked against
#[derive(Debug, Default)]
pub struct CompilationOutputBuilder {
    /// Failed compiled method, phases of its failed rules
    sections: Vec<(String, BTreeSet<CompilePhase>)>,
}

impl CompilationOutputBuilder {
    pub fn build(result: &TestClassResult) -> String {
        let mut builder = Self::default();
        walk_pre_order(result, &mut builder);

        let compilations: Vec<(&str, &Compilation)> = result
            .methods
            .iter()
            .filter_map(|m| m.compilation().map(|c| (m.method(), c)))
            .collect();

        let mut out = String::new();
        let header = format!(
            "Compilations ({}) of Failed Methods ({})",
            compilations.len(),
            result.methods.len()
        );
        let _ = writeln!(out, "{}", header);
        let _ = writeln!(out, "{}", "-".repeat(header.len()));

        for (number, (method, phases)) in builder.sections.iter().enumerate() {
            let Some((_, compilation)) = compilations.iter().find(|(name, _)| name == method) else {
                continue;
            };
            let _ = writeln!(out, "{}) Compilation of \"{}\":", number + 1, method);
            for phase in phases {
                if let Some(text) = compilation.output(*phase) {
                    let _ = writeln!(out, "> Phase \"{}\":", phase.description());
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
        out
    }
}

impl MatchResultVisitor for CompilationOutputBuilder {
    fn should_visit(&mut self, node: &MatchResultNode<'_>) -> bool {
        !matches!(
            node,
            MatchResultNode::CheckAttribute(_) | MatchResultNode::FailOn(_) | MatchResultNode::Counts(_)
        )
    }

    fn visit(&mut self, node: MatchResultNode<'_>) {
        match node {
            MatchResultNode::Method(r) => self.sections.push((r.method.clone(), BTreeSet::new())),
            MatchResultNode::Phase(r) if !r.no_compilation_output => {
                if let Some((_, phases)) = self.sections.last_mut() {
                    phases.insert(r.phase);
                }
            }
            _ => {}
        }
    }
}

//! Pre-order traversal of the result tree

use crate::features::reporting::domain::result::{
    CheckAttributeMatchResult, CompilePhaseMatchResult, ConstraintFailure, CountsConstraintFailure,
    FailOnConstraintFailure, IrMethodMatchResult, IrMethodResult, IrRuleMatchResult, NotCompiledResult,
    TestClassResult,
};

/// Borrowed view of one node of the result tree
#[derive(Debug, Clone, Copy)]
pub enum MatchResultNode<'a> {
    TestClass(&'a TestClassResult),
    Method(&'a IrMethodMatchResult),
    NotCompiled(&'a NotCompiledResult),
    Rule(&'a IrRuleMatchResult),
    Phase(&'a CompilePhaseMatchResult),
    CheckAttribute(&'a CheckAttributeMatchResult),
    FailOn(&'a FailOnConstraintFailure),
    Counts(&'a CountsConstraintFailure),
}

pub trait MatchResultVisitor {
    /// Returning `false` skips the node and its whole subtree
    fn should_visit(&mut self, _node: &MatchResultNode<'_>) -> bool {
        true
    }

    fn visit(&mut self, node: MatchResultNode<'_>);
}

/// Visit `result` and its descendants, parents before children
pub fn walk_pre_order<V: MatchResultVisitor + ?Sized>(result: &TestClassResult, visitor: &mut V) {
    walk(MatchResultNode::TestClass(result), visitor);
}

fn walk<V: MatchResultVisitor + ?Sized>(node: MatchResultNode<'_>, visitor: &mut V) {
    if !visitor.should_visit(&node) {
        return;
    }
    visitor.visit(node);

    match node {
        MatchResultNode::TestClass(r) => {
            for method in &r.methods {
                let child = match method {
                    IrMethodResult::Matched(m) => MatchResultNode::Method(m),
                    IrMethodResult::NotCompiled(m) => MatchResultNode::NotCompiled(m),
                };
                walk(child, visitor);
            }
        }
        MatchResultNode::Method(r) => {
            for rule in &r.rules {
                walk(MatchResultNode::Rule(rule), visitor);
            }
        }
        MatchResultNode::Rule(r) => {
            for phase in &r.phases {
                walk(MatchResultNode::Phase(phase), visitor);
            }
        }
        MatchResultNode::Phase(r) => {
            for attribute in &r.check_attributes {
                walk(MatchResultNode::CheckAttribute(attribute), visitor);
            }
        }
        MatchResultNode::CheckAttribute(r) => {
            for failure in &r.failures {
                let child = match failure {
                    ConstraintFailure::FailOn(f) => MatchResultNode::FailOn(f),
                    ConstraintFailure::Counts(f) => MatchResultNode::Counts(f),
                };
                walk(child, visitor);
            }
        }
        MatchResultNode::NotCompiled(_) | MatchResultNode::FailOn(_) | MatchResultNode::Counts(_) => {}
    }
}

/// Failed methods and failed rules of a result tree
///
/// Not compiled methods count all of their rules as failed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FailCountVisitor {
    pub methods: usize,
    pub rules: usize,
}

impl FailCountVisitor {
    pub fn count(result: &TestClassResult) -> Self {
        let mut visitor = Self::default();
        walk_pre_order(result, &mut visitor);
        visitor
    }
}

impl MatchResultVisitor for FailCountVisitor {
    fn should_visit(&mut self, node: &MatchResultNode<'_>) -> bool {
        matches!(
            node,
            MatchResultNode::TestClass(_)
                | MatchResultNode::Method(_)
                | MatchResultNode::NotCompiled(_)
                | MatchResultNode::Rule(_)
        )
    }

    fn visit(&mut self, node: MatchResultNode<'_>) {
        match node {
            MatchResultNode::Method(_) => self.methods += 1,
            MatchResultNode::NotCompiled(r) => {
                self.methods += 1;
                self.rules += r.rule_count;
            }
            MatchResultNode::Rule(_) => self.rules += 1,
            _ => {}
        }
    }
}

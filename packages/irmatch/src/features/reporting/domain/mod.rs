//! Result tree and its traversal

pub mod result;
pub mod visitor;

pub use result::{
    CheckAttributeKind, CheckAttributeMatchResult, CompilePhaseMatchResult, ConstraintFailure,
    CountsConstraintFailure, FailOnConstraintFailure, IrMethodMatchResult, IrMethodResult, IrRuleMatchResult,
    NotCompiledResult, TestClassResult,
};
pub use visitor::{walk_pre_order, FailCountVisitor, MatchResultNode, MatchResultVisitor};

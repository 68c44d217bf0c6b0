//! Matching engine
//!
//! Applies resolved IR rules to captured compilation output and produces the
//! failure-only result tree of `features::reporting`.

pub mod domain;

pub use domain::{CheckAttribute, CompilePhaseIrRule, Constraint, ConstraintKind, IrMethod, IrRule, TestClass};

//! Constraint parsing domain types

pub mod declaration;
pub mod raw_constraint;

pub use declaration::{IrRuleDeclaration, MethodDeclaration};
pub use raw_constraint::RawConstraint;

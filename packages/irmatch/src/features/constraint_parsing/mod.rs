//! Constraint Parsing Feature
//!
//! Turns `@IR` rule declarations into resolved, matchable [`IrRule`]s:
//! 1. [`CheckAttributeReader`] splits failOn / counts arrays into raw constraints
//! 2. [`IrRuleBuilder`] resolves placeholders per compile phase and parses
//!    count comparisons
//!
//! Every declaration problem is a [`FormatError`] carrying the method name and
//! rule id, raised before the log is read.
//!
//! [`IrRule`]: crate::features::matching::IrRule
//! [`FormatError`]: crate::errors::FormatError

pub mod domain;
pub mod infrastructure;

pub use domain::{IrRuleDeclaration, MethodDeclaration, RawConstraint};
pub use infrastructure::{CheckAttributeReader, IrRuleBuilder};

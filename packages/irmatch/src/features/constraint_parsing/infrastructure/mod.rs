//! Constraint parsing infrastructure

pub mod reader;
pub mod rule_builder;

pub use reader::CheckAttributeReader;
pub use rule_builder::IrRuleBuilder;

//! Node mapping domain types

pub mod entry;
pub mod ir_node;

pub use entry::{NodeMapEntry, PhasePolicy, IS_REPLACED};

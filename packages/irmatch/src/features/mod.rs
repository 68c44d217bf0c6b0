//! Feature modules, in pipeline order
//!
//! - `node_mappings`: placeholder → default regex per compile phase
//! - `log_parsing`: compile ids and phase dumps from the VM log
//! - `constraint_parsing`: rule declarations → resolved IR rules
//! - `matching`: IR rules applied to captured output
//! - `reporting`: result tree and its renderers

pub mod constraint_parsing;
pub mod log_parsing;
pub mod matching;
pub mod node_mappings;
pub mod reporting;

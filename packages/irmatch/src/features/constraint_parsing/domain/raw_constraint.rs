//! Unresolved constraint read from a check attribute

use crate::features::node_mappings::ir_node;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConstraint {
    /// Placeholder or literal regex
    pub node: String,
    /// Present exactly for composite placeholders
    pub user_postfix: Option<String>,
    /// Present exactly for counts constraints
    pub count: Option<String>,
    /// 1-based position within its attribute
    pub index: usize,
}

impl RawConstraint {
    pub fn is_placeholder(&self) -> bool {
        ir_node::is_placeholder(&self.node)
    }

    pub fn is_composite(&self) -> bool {
        ir_node::is_composite(&self.node)
    }
}

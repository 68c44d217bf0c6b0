//! Splits a flat check attribute array into raw constraints

use crate::errors::{FormatError, FormatErrorKind};
use crate::features::constraint_parsing::domain::RawConstraint;
use crate::features::node_mappings::ir_node;
use crate::features::reporting::CheckAttributeKind;

/// Reads `node [postfix] [count]` groups
pub struct CheckAttributeReader<'a> {
    kind: CheckAttributeKind,
    items: &'a [String],
}

impl<'a> CheckAttributeReader<'a> {
    pub fn new(kind: CheckAttributeKind, items: &'a [String]) -> Self {
        Self { kind, items }
    }

    pub fn read(&self) -> Result<Vec<RawConstraint>, FormatError> {
        let mut constraints = Vec::new();
        let mut position = 0;
        while position < self.items.len() {
            let node = &self.items[position];
            let index = constraints.len() + 1;
            position += 1;

            let user_postfix = if ir_node::is_composite(node) {
                let postfix = self.items.get(position).ok_or_else(|| {
                    FormatError::new(
                        FormatErrorKind::MissingPostfix,
                        format!(
                            "Must provide additional value at index {} right after {}",
                            position, node
                        ),
                    )
                    .at_constraint(self.kind, index)
                })?;
                if postfix.is_empty() {
                    return Err(FormatError::new(
                        FormatErrorKind::EmptyPostfix,
                        format!(
                            "Provided empty string for composite node {} at index {}",
                            node, position
                        ),
                    )
                    .at_constraint(self.kind, index));
                }
                position += 1;
                Some(postfix.clone())
            } else {
                None
            };

            let count = match self.kind {
                CheckAttributeKind::FailOn => None,
                CheckAttributeKind::Counts => {
                    let count = self.items.get(position).ok_or_else(|| {
                        FormatError::new(
                            FormatErrorKind::MissingCount,
                            format!("Missing count for node {}", node),
                        )
                        .at_constraint(self.kind, index)
                    })?;
                    position += 1;
                    Some(count.clone())
                }
            };

            constraints.push(RawConstraint {
                node: node.clone(),
                user_postfix,
                count,
                index,
            });
        }
        Ok(constraints)
    }
}

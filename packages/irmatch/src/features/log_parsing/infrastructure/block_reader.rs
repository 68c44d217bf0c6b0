//! Reads the body of one dump block

use crate::features::log_parsing::domain::{BlockKind, LinePatterns};
use crate::shared::utils::unescape_xml;
use std::io;

/// Body of a dump block plus the assignment lines found inside it
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Block {
    pub output: String,
    pub nested_assignments: Vec<String>,
    /// `false` when the stream ended before the end tag
    pub terminated: bool,
}

pub struct BlockReader<'p> {
    patterns: &'p LinePatterns,
}

impl<'p> BlockReader<'p> {
    pub fn new(patterns: &'p LinePatterns) -> Self {
        Self { patterns }
    }

    /// Consume lines up to and including the end tag of `kind`
    ///
    /// The VM may queue compilations while a dump is printed, so assignment
    /// lines inside a block are kept aside instead of becoming output.
    pub fn read<I>(&self, lines: &mut I, kind: BlockKind) -> io::Result<Block>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let mut block = Block::default();
        for line in lines {
            let line = line?;
            if kind.is_end_line(&line) {
                block.terminated = true;
                break;
            }
            if self.patterns.is_test_class_assignment(&line) {
                block.nested_assignments.push(line);
            } else {
                block.output.push_str(&unescape_xml(&line));
                block.output.push('\n');
            }
        }
        Ok(block)
    }
}

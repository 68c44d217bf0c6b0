//! Log parsing infrastructure

pub mod block_reader;
pub mod parser;

pub use block_reader::{Block, BlockReader};
pub use parser::{CompilationLog, CompilationLogParser};

//! Compilation log parsing
//!
//! Streams the VM's compilation log and collects, per method of the test
//! class, the phase dumps of its latest compilation.

pub mod domain;
pub mod infrastructure;

pub use domain::{BlockKind, LinePatterns, TestMethod};
pub use infrastructure::{CompilationLog, CompilationLogParser};

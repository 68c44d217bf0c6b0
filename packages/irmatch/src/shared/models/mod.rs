//! Shared models used across all features

pub mod compilation;
pub mod comparison;
pub mod compile_phase;

pub use compilation::Compilation;
pub use comparison::{Comparator, Comparison};
pub use compile_phase::{CompilePhase, RegexType, RepeatPolicy};

//! Pipeline orchestration

pub mod matcher;

pub use matcher::{IrMatcher, IrViolation, MatchVerdict, SAFEPOINT_WHILE_PRINTING};

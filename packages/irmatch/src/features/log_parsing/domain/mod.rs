//! Log parsing domain types

pub mod log_line;
pub mod test_method;

pub use log_line::{BlockKind, LinePatterns};
pub use test_method::TestMethod;

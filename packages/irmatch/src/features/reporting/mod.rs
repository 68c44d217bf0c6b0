//! Match results and reporting
//!
//! The result tree only holds failures. Renderers walk it through
//! [`MatchResultVisitor`]:
//! - [`FailureMessageBuilder`]: the human-readable failure report
//! - [`JsonReportBuilder`]: the same content as JSON
//! - [`CompilationOutputBuilder`]: captured output of the failed methods

pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::{CompilationOutputBuilder, FailureMessageBuilder, JsonReport, JsonReportBuilder};

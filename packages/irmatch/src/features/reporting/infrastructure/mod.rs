//! Report renderers

pub mod compilation_output;
pub mod failure_message;
pub mod json;

pub use compilation_output::CompilationOutputBuilder;
pub use failure_message::FailureMessageBuilder;
pub use json::{JsonReport, JsonReportBuilder};

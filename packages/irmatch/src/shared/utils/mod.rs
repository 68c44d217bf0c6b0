//! Utility modules shared across features
//!
//! - `text`: indentation and XML entity handling for log and report text

pub mod text;

pub use text::{indent, unescape_xml};

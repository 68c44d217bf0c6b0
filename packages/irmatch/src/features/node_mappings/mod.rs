//! Node Mappings Feature
//!
//! Maps IR node placeholders (`_#STORE_I#_`) to the default regex used on a
//! given compile phase.
//!
//! ## Phase policies
//! - **IdealFixed**: `PRINT_IDEAL` only
//! - **AllIdeal**: every ideal phase
//! - **IdealWithLoops** / **IdealWithCountedLoops**: loop phases only
//! - **Range**: inclusive phase interval plus `PRINT_IDEAL`
//! - **OptoOnly**: `PRINT_OPTO_ASSEMBLY` only
//! - **IdealAndOpto**: separate regexes for an ideal interval and the assembly
//!
//! Asking for a phase outside the policy is a format error, raised while the
//! rules are built and before any log line is matched.

pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::*;

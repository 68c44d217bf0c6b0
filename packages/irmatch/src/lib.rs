/*
 * irmatch - IR rule matcher for C2 compilation logs
 *
 * Feature-First Architecture:
 * - shared/      : Compile phases, captured compilations, comparisons
 * - features/    : node_mappings → log_parsing → constraint_parsing → matching → reporting
 * - pipeline/    : IrMatcher orchestration
 * - config/      : Versioned YAML configuration and rule files
 */

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration and rule files
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{MatcherConfig, ReportFormat, RuleFile};
pub use errors::{FormatError, FormatErrorKind, IrMatchError, Result};
pub use features::constraint_parsing::{IrRuleDeclaration, MethodDeclaration};
pub use features::node_mappings::{ir_node, NodeMappingTable};
pub use features::reporting::TestClassResult;
pub use pipeline::{IrMatcher, IrViolation, MatchVerdict};
pub use shared::models::{Compilation, CompilePhase};

//! Matchable rule hierarchy: class → method → rule → phase rule → attribute → constraint

pub mod check_attribute;
pub mod constraint;
pub mod ir_method;
pub mod ir_rule;
pub mod phase_rule;
pub mod test_class;

pub use check_attribute::CheckAttribute;
pub use constraint::{Constraint, ConstraintKind};
pub use ir_method::IrMethod;
pub use ir_rule::IrRule;
pub use phase_rule::CompilePhaseIrRule;
pub use test_class::TestClass;

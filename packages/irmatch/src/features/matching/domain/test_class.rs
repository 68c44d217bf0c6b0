//! All methods of a test class

use crate::features::matching::domain::ir_method::IrMethod;
use crate::features::reporting::TestClassResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestClass {
    methods: Vec<IrMethod>,
}

impl TestClass {
    pub fn new(methods: Vec<IrMethod>) -> Self {
        Self { methods }
    }

    pub fn methods(&self) -> &[IrMethod] {
        &self.methods
    }

    /// Failed methods in declaration order
    pub fn apply(&self) -> TestClassResult {
        TestClassResult::new(self.methods.iter().filter_map(IrMethod::apply).collect())
    }
}

//! Match-time record of a method under test

use crate::features::matching::domain::ir_rule::IrRule;
use crate::features::reporting::{IrMethodMatchResult, IrMethodResult, NotCompiledResult};
use crate::shared::models::Compilation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrMethod {
    name: String,
    rules: Vec<IrRule>,
    compilation: Option<Compilation>,
}

impl IrMethod {
    pub fn new(name: impl Into<String>, rules: Vec<IrRule>, compilation: Option<Compilation>) -> Self {
        Self {
            name: name.into(),
            rules,
            compilation,
        }
    }

    /// Same rules, matched against `compilation`
    pub fn with_compilation(mut self, compilation: Option<Compilation>) -> Self {
        self.compilation = compilation;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[IrRule] {
        &self.rules
    }

    pub fn compilation(&self) -> Option<&Compilation> {
        self.compilation.as_ref()
    }

    /// `None` when every rule passed
    pub fn apply(&self) -> Option<IrMethodResult> {
        let Some(compilation) = &self.compilation else {
            return Some(IrMethodResult::NotCompiled(NotCompiledResult {
                method: self.name.clone(),
                rule_count: self.rules.len(),
            }));
        };
        let rules: Vec<_> = self.rules.iter().filter_map(|rule| rule.apply(compilation)).collect();
        (!rules.is_empty()).then(|| {
            IrMethodResult::Matched(IrMethodMatchResult {
                method: self.name.clone(),
                rules,
                compilation: compilation.clone(),
            })
        })
    }
}

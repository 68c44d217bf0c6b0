//! Rule declarations as handed in by the caller

use crate::shared::models::CompilePhase;

/// One `@IR` rule before resolution
///
/// `fail_on` and `counts` are the flat string arrays of the annotation: a
/// composite placeholder is followed by its user postfix, every counts node
/// (and postfix) is followed by a count string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IrRuleDeclaration {
    pub phases: Vec<CompilePhase>,
    pub fail_on: Vec<String>,
    pub counts: Vec<String>,
    pub annotation: Option<String>,
}

impl IrRuleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phase(mut self, phase: CompilePhase) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn with_fail_on<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fail_on.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn with_counts<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.counts.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Declared phases, `[DEFAULT]` if none were given
    pub fn effective_phases(&self) -> Vec<CompilePhase> {
        if self.phases.is_empty() {
            vec![CompilePhase::Default]
        } else {
            self.phases.clone()
        }
    }

    /// Text shown in reports, rebuilt from the attributes if none was given
    pub fn display_annotation(&self) -> String {
        if let Some(annotation) = &self.annotation {
            return annotation.clone();
        }
        let quoted = |items: &[String]| {
            items
                .iter()
                .map(|s| format!("\"{}\"", s))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let mut parts = Vec::new();
        if !self.fail_on.is_empty() {
            parts.push(format!("failOn = {{{}}}", quoted(&self.fail_on)));
        }
        if !self.counts.is_empty() {
            parts.push(format!("counts = {{{}}}", quoted(&self.counts)));
        }
        if !self.phases.is_empty() {
            let phases: Vec<_> = self.phases.iter().map(|p| p.name()).collect();
            parts.push(format!("phase = {{{}}}", phases.join(", ")));
        }
        format!("@IR({})", parts.join(", "))
    }
}

/// A method under test and its rules, rule ids are positions starting at 1
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub name: String,
    pub rules: Vec<IrRuleDeclaration>,
}

impl MethodDeclaration {
    pub fn new(name: impl Into<String>, rules: Vec<IrRuleDeclaration>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }
}

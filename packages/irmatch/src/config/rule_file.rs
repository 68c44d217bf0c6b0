//! Rule declarations loaded from YAML
//!
//! The CLI has no annotation discovery, so rule declarations for a test class
//! are handed in as a YAML document:
//!
//! ```yaml
//! version: 1
//! test_class: ir_framework.tests.Basics
//! methods:
//!   - name: test1
//!     rules:
//!       - phase: [PRINT_IDEAL]
//!         fail_on: ["_#STORE_I#_"]
//!         counts: ["_#LOAD_I#_", "= 1"]
//! ```

use super::error::{check_version, ConfigError, ConfigResult};
use super::io::{MethodEntryV1, RuleEntryV1, RuleFileV1};
use crate::features::constraint_parsing::{IrRuleDeclaration, MethodDeclaration};
use crate::shared::models::CompilePhase;
use std::collections::HashSet;
use std::path::Path;

/// Test class name plus the per-method rule declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFile {
    pub test_class: String,
    pub methods: Vec<MethodDeclaration>,
}

impl RuleFile {
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: RuleFileV1 = serde_yaml::from_str(content)?;
        check_version(export.version)?;

        let mut seen = HashSet::new();
        let mut methods = Vec::with_capacity(export.methods.len());
        for entry in export.methods {
            if !seen.insert(entry.name.clone()) {
                return Err(ConfigError::DuplicateMethod(entry.name));
            }
            methods.push(method_from_entry(entry)?);
        }

        Ok(Self {
            test_class: export.test_class,
            methods,
        })
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = RuleFileV1 {
            version: Some(1),
            test_class: self.test_class.clone(),
            methods: self
                .methods
                .iter()
                .map(|m| MethodEntryV1 {
                    name: m.name.clone(),
                    rules: m.rules.iter().map(rule_to_entry).collect(),
                })
                .collect(),
        };
        Ok(serde_yaml::to_string(&export)?)
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }
}

fn method_from_entry(entry: MethodEntryV1) -> ConfigResult<MethodDeclaration> {
    let rules = entry
        .rules
        .into_iter()
        .map(rule_from_entry)
        .collect::<ConfigResult<Vec<_>>>()?;
    Ok(MethodDeclaration {
        name: entry.name,
        rules,
    })
}

fn rule_from_entry(entry: RuleEntryV1) -> ConfigResult<IrRuleDeclaration> {
    let phases = entry
        .phase
        .iter()
        .map(|name| {
            CompilePhase::from_name(name.trim()).ok_or_else(|| ConfigError::UnknownPhase(name.clone()))
        })
        .collect::<ConfigResult<Vec<_>>>()?;

    Ok(IrRuleDeclaration {
        phases,
        fail_on: entry.fail_on,
        counts: entry.counts,
        annotation: entry.annotation,
    })
}

fn rule_to_entry(rule: &IrRuleDeclaration) -> RuleEntryV1 {
    RuleEntryV1 {
        phase: rule.phases.iter().map(|p| p.name().to_string()).collect(),
        fail_on: rule.fail_on.clone(),
        counts: rule.counts.clone(),
        annotation: rule.annotation.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const RULES: &str = r#"
version: 1
test_class: ir_framework.tests.Basics
methods:
  - name: test1
    rules:
      - phase: [PRINT_IDEAL, AFTER_PARSING]
        fail_on: ["_#STORE_I#_"]
      - counts: ["_#C#LOAD_I_OF_CLASS#_", "Foo", ">= 2"]
        annotation: loads of Foo
  - name: test2
"#;

    #[test]
    fn test_load_rule_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(RULES.as_bytes()).unwrap();

        let rules = RuleFile::from_yaml(temp_file.path()).unwrap();
        assert_eq!(rules.test_class, "ir_framework.tests.Basics");
        assert_eq!(rules.method_names(), vec!["test1", "test2"]);

        let test1 = &rules.methods[0];
        assert_eq!(test1.rules.len(), 2);
        assert_eq!(
            test1.rules[0].phases,
            vec![CompilePhase::PrintIdeal, CompilePhase::AfterParsing]
        );
        assert!(test1.rules[1].phases.is_empty());
        assert_eq!(test1.rules[1].counts.len(), 3);
        assert_eq!(test1.rules[1].annotation.as_deref(), Some("loads of Foo"));
        assert!(rules.methods[1].rules.is_empty());
    }

    #[test]
    fn test_unknown_phase() {
        let yaml = r#"
version: 1
test_class: A
methods:
  - name: m
    rules:
      - phase: [AFTER_LUNCH]
        fail_on: ["x"]
"#;
        let err = RuleFile::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPhase(ref p) if p == "AFTER_LUNCH"));
    }

    #[test]
    fn test_duplicate_method() {
        let yaml = r#"
version: 1
test_class: A
methods:
  - name: m
  - name: m
"#;
        let err = RuleFile::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateMethod(_)));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let rules = RuleFile::from_yaml_str(RULES).unwrap();
        let yaml = rules.to_yaml().unwrap();
        assert!(yaml.contains("PRINT_IDEAL"));

        let reloaded = RuleFile::from_yaml_str(&yaml).unwrap();
        assert_eq!(reloaded, rules);
    }
}

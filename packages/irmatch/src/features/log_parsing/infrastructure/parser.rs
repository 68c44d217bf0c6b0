//! Streaming compilation log parser
//!
//! Scans the VM log once, tracking which compile id belongs to which method
//! of the test class, and captures the phase dumps of those compile ids.
//! Compilations of other classes and untracked methods are skipped.

use crate::errors::{FormatError, FormatErrorKind, IrMatchError, Result};
use crate::features::log_parsing::domain::{BlockKind, LinePatterns, TestMethod};
use crate::features::log_parsing::infrastructure::block_reader::BlockReader;
use crate::shared::models::{Compilation, CompilePhase};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Captured output per method, in the order the methods were given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationLog {
    entries: Vec<(String, Option<Compilation>)>,
}

impl CompilationLog {
    /// `None` for untracked or not compiled methods
    pub fn compilation(&self, method: &str) -> Option<&Compilation> {
        self.entries
            .iter()
            .find(|(name, _)| name == method)
            .and_then(|(_, c)| c.as_ref())
    }

    pub fn is_compiled(&self, method: &str) -> bool {
        self.compilation(method).is_some()
    }

    pub fn not_compiled(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, c)| c.is_none())
            .map(|(name, _)| name.as_str())
    }

    /// Move the compilation of `method` out of the log
    pub fn take(&mut self, method: &str) -> Option<Compilation> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == method)
            .and_then(|(_, c)| c.take())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-run scan state
struct ParseState {
    methods: Vec<TestMethod>,
    by_name: HashMap<String, usize>,
    compile_ids: HashMap<u32, usize>,
}

impl ParseState {
    fn new(method_names: &[String]) -> Self {
        let methods: Vec<TestMethod> = method_names.iter().map(TestMethod::new).collect();
        let by_name = method_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            methods,
            by_name,
            compile_ids: HashMap::new(),
        }
    }

    fn into_log(self) -> CompilationLog {
        let entries = self
            .methods
            .into_iter()
            .map(|m| (m.name().to_string(), m.into_compilation()))
            .collect();
        CompilationLog { entries }
    }
}

pub struct CompilationLogParser {
    test_class: String,
    method_names: Vec<String>,
    patterns: LinePatterns,
}

impl CompilationLogParser {
    pub fn new<S: AsRef<str>>(test_class: &str, method_names: &[S]) -> Result<Self> {
        let patterns = LinePatterns::new(test_class).map_err(|e| {
            FormatError::new(
                FormatErrorKind::InvalidRegex,
                format!("Cannot build log patterns for test class \"{}\": {}", test_class, e),
            )
        })?;
        Ok(Self {
            test_class: test_class.to_string(),
            method_names: method_names.iter().map(|s| s.as_ref().to_string()).collect(),
            patterns,
        })
    }

    pub fn test_class(&self) -> &str {
        &self.test_class
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<CompilationLog> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let file = File::open(path).map_err(|e| IrMatchError::io(&source_name, e))?;
        self.parse_reader(BufReader::new(file), &source_name)
    }

    pub fn parse_reader<R: BufRead>(&self, reader: R, source_name: &str) -> Result<CompilationLog> {
        let mut state = ParseState::new(&self.method_names);
        let block_reader = BlockReader::new(&self.patterns);
        let mut lines = reader.lines();

        while let Some(line) = lines.next() {
            let line = line.map_err(|e| IrMatchError::io(source_name, e))?;

            if self.patterns.is_test_class_assignment(&line) {
                self.register_assignment(&mut state, &line, source_name)?;
                continue;
            }

            let Some(kind) = BlockKind::of_start_line(&line) else {
                continue;
            };
            let compile_id = self
                .patterns
                .compile_id(&line)
                .ok_or_else(|| IrMatchError::file_corrupted(source_name, &line))?;
            if !state.compile_ids.contains_key(&compile_id) {
                continue;
            }

            let phase = self.block_phase(kind, &line);
            let block = block_reader
                .read(&mut lines, kind)
                .map_err(|e| IrMatchError::io(source_name, e))?;
            if !block.terminated {
                warn!(
                    file = source_name,
                    compile_id, "Log ended inside a dump block, keeping the partial output"
                );
            }

            for nested in &block.nested_assignments {
                self.register_assignment(&mut state, nested, source_name)?;
            }

            let Some(phase) = phase else { continue };
            // A nested assignment may have retired this compile id
            let Some(&index) = state.compile_ids.get(&compile_id) else {
                debug!(compile_id, "Dropping dump of a superseded compilation");
                continue;
            };
            let method = &mut state.methods[index];
            debug!(
                method = method.name(),
                compile_id,
                phase = phase.name(),
                bytes = block.output.len(),
                "Captured phase output"
            );
            method.set_output(phase, block.output);
        }

        let log = state.into_log();
        for method in log.not_compiled() {
            debug!(method, "No compilation output captured");
        }
        Ok(log)
    }

    fn register_assignment(&self, state: &mut ParseState, line: &str, source_name: &str) -> Result<()> {
        let Some(name) = self.patterns.method_name(line) else {
            return Ok(());
        };
        let Some(&index) = state.by_name.get(name) else {
            return Ok(());
        };
        let compile_id = self
            .patterns
            .compile_id(line)
            .ok_or_else(|| IrMatchError::file_corrupted(source_name, line))?;

        state.compile_ids.retain(|_, m| *m != index);
        let method = &mut state.methods[index];
        method.clear();
        state.compile_ids.insert(compile_id, index);
        debug!(method = name, compile_id, "Registered compile id");
        Ok(())
    }

    /// `None` for ideal blocks with an unknown phase description
    fn block_phase(&self, kind: BlockKind, line: &str) -> Option<CompilePhase> {
        match kind {
            BlockKind::OptoAssembly => Some(CompilePhase::PrintOptoAssembly),
            BlockKind::Ideal => match self.patterns.compile_phase(line) {
                // Older VMs only emit PrintIdeal and omit the attribute
                None => Some(CompilePhase::PrintIdeal),
                Some(description) => {
                    let phase = CompilePhase::from_description(description);
                    if phase.is_none() {
                        warn!(description, "Unknown compile phase in log, skipping block");
                    }
                    phase
                }
            },
        }
    }
}

//! Line classification for the compilation log
//!
//! Relevant line shapes:
//! - `<task_queued compile_id='42' method='pkg/Test test1 ()V' ...>`: a
//!   compile id is assigned to a method
//! - `<ideal compile_id='42' compile_phase='After Parsing'>`: start of an
//!   ideal graph dump, closed by `</ideal>`
//! - `<opto_assembly compile_id='42' ...>`: start of a PrintOptoAssembly
//!   dump, closed by `</opto_assembly>`

use regex::Regex;

const ASSIGNMENT_PREFIX: &str = "<task_queued";

/// Kind of a dump block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Ideal,
    OptoAssembly,
}

impl BlockKind {
    /// Classify a block start line
    pub fn of_start_line(line: &str) -> Option<BlockKind> {
        let rest = line.trim_start();
        if starts_tag(rest, "<ideal") {
            Some(BlockKind::Ideal)
        } else if starts_tag(rest, "<opto_assembly") {
            Some(BlockKind::OptoAssembly)
        } else {
            None
        }
    }

    pub fn is_end_line(self, line: &str) -> bool {
        let rest = line.trim_start();
        match self {
            BlockKind::Ideal => rest.starts_with("</ideal>"),
            BlockKind::OptoAssembly => rest.starts_with("</opto_assembly>"),
        }
    }
}

/// `tag` followed by whitespace, `>` or end of line
fn starts_tag(line: &str, tag: &str) -> bool {
    line.strip_prefix(tag).is_some_and(|rest| {
        rest.chars()
            .next()
            .map_or(true, |c| c.is_whitespace() || c == '>' || c == '/')
    })
}

/// Regexes bound to one test class
#[derive(Debug, Clone)]
pub struct LinePatterns {
    compile_id: Regex,
    test_class_method: Regex,
    compile_phase: Regex,
}

impl LinePatterns {
    pub fn new(test_class: &str) -> Result<Self, regex::Error> {
        // Logs spell packages with '.' or '/' depending on the VM version
        let class = regex::escape(test_class).replace(r"\.", "[./]");
        Ok(Self {
            compile_id: Regex::new(r"compile_id='(\d+)'")?,
            test_class_method: Regex::new(&format!(r"(?:^|[\s'])(?:{class})\s+([^\s']+)"))?,
            compile_phase: Regex::new(r"compile_phase='([^']*)'")?,
        })
    }

    /// Compile-id assignment mentioning a method of the test class
    pub fn is_test_class_assignment(&self, line: &str) -> bool {
        line.starts_with(ASSIGNMENT_PREFIX) && self.test_class_method.is_match(line)
    }

    pub fn method_name<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.test_class_method
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// `None` if the attribute is absent or does not fit a `u32`
    pub fn compile_id(&self, line: &str) -> Option<u32> {
        self.compile_id
            .captures(line)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Raw `compile_phase='...'` attribute of an ideal block start
    pub fn compile_phase<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.compile_phase
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }
}

//! Count comparisons of counts constraints

use crate::errors::{FormatError, FormatErrorKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Comparator {
    /// Longest operators first so `<=` is not read as `<`
    const SYMBOLS: [(&'static str, Comparator); 7] = [
        ("==", Comparator::Equal),
        ("!=", Comparator::NotEqual),
        ("<=", Comparator::LessEqual),
        (">=", Comparator::GreaterEqual),
        ("=", Comparator::Equal),
        ("<", Comparator::Less),
        (">", Comparator::Greater),
    ];

    pub fn holds(self, found: usize, given: usize) -> bool {
        match self {
            Comparator::Equal => found == given,
            Comparator::NotEqual => found != given,
            Comparator::Less => found < given,
            Comparator::LessEqual => found <= given,
            Comparator::Greater => found > given,
            Comparator::GreaterEqual => found >= given,
        }
    }
}

/// `<comparator> <bound>` as written in a counts attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comparison {
    comparator: Comparator,
    /// Operator as the user wrote it (`=` for a bare number)
    symbol: String,
    given: usize,
}

impl Comparison {
    pub fn new(comparator: Comparator, symbol: impl Into<String>, given: usize) -> Self {
        Self {
            comparator,
            symbol: symbol.into(),
            given,
        }
    }

    /// Parse `"2"`, `"= 2"`, `">=1"`, `"!= 0"`, ...
    pub fn parse(raw: &str) -> Result<Self, FormatError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(malformed(raw, "provided empty value"));
        }

        let (comparator, symbol, rest) = match Comparator::SYMBOLS
            .iter()
            .find(|(symbol, _)| trimmed.starts_with(symbol))
        {
            Some((symbol, comparator)) => (*comparator, *symbol, &trimmed[symbol.len()..]),
            None => (Comparator::Equal, "=", trimmed),
        };

        let value = rest.trim();
        if value.is_empty() {
            return Err(malformed(raw, "missing value after comparator"));
        }
        if value.starts_with('-') {
            return Err(malformed(raw, "value cannot be negative"));
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(raw, "value must be a non-negative integer"));
        }
        let given = value
            .parse()
            .map_err(|_| malformed(raw, "value is out of range"))?;

        Ok(Self::new(comparator, symbol, given))
    }

    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn given(&self) -> usize {
        self.given
    }

    pub fn compare(&self, found: usize) -> bool {
        self.comparator.holds(found, self.given)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol, self.given)
    }
}

fn malformed(raw: &str, reason: &str) -> FormatError {
    FormatError::new(
        FormatErrorKind::MalformedComparison,
        format!(
            "Invalid count string \"{}\": {}. Expected \"<comparator> <non-negative integer>\" \
             with comparator one of =, ==, !=, <, <=, >, >=",
            raw, reason
        ),
    )
}

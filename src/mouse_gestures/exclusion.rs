use regex::{Regex, RegexBuilder};
use std::fmt;

/// Site patterns for which gestures are switched off.
///
/// Patterns use `*` for any run of characters and `?` for a single character
/// and must match the whole URL, ignoring case.
#[derive(Debug, Clone, Default)]
pub struct ExclusionMatcher {
    patterns: Vec<Regex>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    pub pattern: String,
    pub reason: String,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid exclusion pattern '{}': {}", self.pattern, self.reason)
    }
}

impl std::error::Error for PatternError {}

impl ExclusionMatcher {
    pub fn new(exclusions: &[String]) -> Self {
        let mut matcher = Self::default();
        matcher.update_patterns(exclusions);
        matcher
    }

    /// Recompiles the pattern list. Blank entries are ignored and malformed
    /// ones are logged and skipped.
    pub fn update_patterns(&mut self, exclusions: &[String]) {
        self.patterns = exclusions
            .iter()
            .filter(|pattern| !pattern.trim().is_empty())
            .filter_map(|pattern| match compile_pattern(pattern) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    tracing::warn!(%err, "skipping exclusion pattern");
                    None
                }
            })
            .collect();
    }

    pub fn is_excluded(&self, url: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(url))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn validate_pattern(pattern: &str) -> Result<(), PatternError> {
        compile_pattern(pattern).map(|_| ())
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, PatternError> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            other => source.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    source.push('$');

    RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .map_err(|err| PatternError {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })
}

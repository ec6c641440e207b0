//! Syntactic validation of a composed configuration.
//!
//! A single pass over the text: each non-blank, non-comment line is handed to
//! every [`LineRule`], and every finding is collected. Validation passes iff
//! no rule reports anything on any line. All checks are pure functions of the
//! input text.

use serde::Serialize;

/// Lines starting with this marker (after indentation) are comments.
pub const COMMENT_MARKER: char = '!';

/// An independent check over a single configuration line.
pub trait LineRule: std::fmt::Debug + Send + Sync {
    /// Machine-readable code (e.g. `trailing-whitespace`).
    fn code(&self) -> &'static str;

    /// Describe the issue on `line`, or `None` if the line is acceptable.
    fn check(&self, line: &str) -> Option<String>;
}

/// Flags lines that end in spaces or tabs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingWhitespace;

impl LineRule for TrailingWhitespace {
    fn code(&self) -> &'static str {
        "trailing-whitespace"
    }

    fn check(&self, line: &str) -> Option<String> {
        (line.len() != line.trim_end().len()).then(|| "Trailing whitespace".to_string())
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFinding {
    /// 1-based line number.
    pub line: usize,
    /// Code of the rule that fired.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl std::fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}: {}", self.line, self.message)
    }
}

/// Outcome of one validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True iff `findings` is empty.
    pub passed: bool,
    /// Findings in line order, then rule order.
    pub findings: Vec<ValidationFinding>,
}

/// An ordered rule set.
#[derive(Debug)]
pub struct Validator {
    rules: Vec<Box<dyn LineRule>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            rules: vec![Box::new(TrailingWhitespace)],
        }
    }
}

impl Validator {
    /// A validator with no rules; everything passes.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: impl LineRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_codes(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.code()).collect()
    }

    pub fn validate(&self, text: &str) -> ValidationResult {
        let mut findings = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let stripped = line.trim();
            if stripped.is_empty() || stripped.starts_with(COMMENT_MARKER) {
                continue;
            }
            for rule in &self.rules {
                if let Some(message) = rule.check(line) {
                    findings.push(ValidationFinding {
                        line: idx + 1,
                        code: rule.code(),
                        message,
                    });
                }
            }
        }

        ValidationResult {
            passed: findings.is_empty(),
            findings,
        }
    }
}

/// Validate with the default rule set.
pub fn validate(text: &str) -> ValidationResult {
    Validator::default().validate(text)
}

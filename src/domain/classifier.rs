//! Pattern-based URL risk classification.
//!
//! Rules are evaluated in order and the first match wins. The default rule
//! set flags a few known-bad domains and any URL on plain `http://`.
//! This is a heuristic, not a reputation service.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

use crate::domain::entities::Verdict;

/// Known-bad domain patterns, matched case-insensitively anywhere in the URL.
const KNOWN_BAD_DOMAINS: &[&str] = &[r"malicious\.com", r"phishing\.com", r"spam\.com"];

/// Insecure transport: plain HTTP scheme.
const INSECURE_SCHEME: &str = r"^http://";

static DEFAULT_RULES: LazyLock<Vec<ClassifierRule>> = LazyLock::new(|| {
    let mut rules: Vec<ClassifierRule> = KNOWN_BAD_DOMAINS
        .iter()
        .map(|pattern| ClassifierRule::new("known_bad_domain", pattern).unwrap())
        .collect();
    rules.push(ClassifierRule::new("insecure_scheme", INSECURE_SCHEME).unwrap());
    rules
});

/// A single named, case-insensitive pattern.
#[derive(Debug, Clone)]
pub struct ClassifierRule {
    name: String,
    pattern: Regex,
}

impl ClassifierRule {
    /// Compiles `pattern` case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if the pattern does not compile.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            name: name.into(),
            pattern,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }
}

/// Stateless classifier over an ordered rule set.
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    rules: Vec<ClassifierRule>,
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.clone(),
        }
    }
}

impl PatternClassifier {
    pub fn with_rules(rules: Vec<ClassifierRule>) -> Self {
        Self { rules }
    }

    /// First rule matching `url`, if any.
    pub fn matching_rule(&self, url: &str) -> Option<&ClassifierRule> {
        self.rules.iter().find(|rule| rule.matches(url))
    }

    pub fn classify(&self, url: &str) -> Verdict {
        if self.matching_rule(url).is_some() {
            Verdict::Suspicious
        } else {
            Verdict::Safe
        }
    }
}

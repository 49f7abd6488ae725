//! Ordered, chained text substitution for voice-alarm phrases.

use regex::Regex;
use tracing::debug;

/// How a rule pattern is matched.
#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    /// Patterns that are not valid regular expressions match literally.
    Literal,
}

/// One pattern -> replacement rule.
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pattern: String,
    replacement: String,
    matcher: Matcher,
}

impl SubstitutionRule {
    /// Create a rule. The pattern is compiled as a regular expression when
    /// possible and matched literally otherwise.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let matcher = match Regex::new(&pattern) {
            Ok(re) => Matcher::Regex(re),
            Err(e) => {
                debug!("Rule '{}' is not a valid regex, matching literally: {}", pattern, e);
                Matcher::Literal
            }
        };
        Self {
            pattern,
            replacement: replacement.into(),
            matcher,
        }
    }

    /// Rule pattern as written.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Replacement text as written.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Check if the pattern is matched literally.
    pub fn is_literal(&self) -> bool {
        matches!(self.matcher, Matcher::Literal)
    }

    /// Apply this rule to a text, replacing every match.
    pub fn apply(&self, text: &str) -> String {
        match &self.matcher {
            Matcher::Regex(re) => re.replace_all(text, self.replacement.as_str()).into_owned(),
            Matcher::Literal => text.replace(&self.pattern, &self.replacement),
        }
    }
}

/// Ordered rule list. File order is kept and duplicates are not merged.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<SubstitutionRule>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule set from (pattern, replacement) pairs in order.
    pub fn from_pairs<P, R>(pairs: impl IntoIterator<Item = (P, R)>) -> Self
    where
        P: Into<String>,
        R: Into<String>,
    {
        Self {
            rules: pairs
                .into_iter()
                .map(|(p, r)| SubstitutionRule::new(p, r))
                .collect(),
        }
    }

    /// Append a rule.
    pub fn push(&mut self, rule: SubstitutionRule) {
        self.rules.push(rule);
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    /// Apply all rules left to right; each rule sees the output of the previous one.
    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }
}

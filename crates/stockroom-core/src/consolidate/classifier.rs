// ── Model classification rules ──
//
// Ordered (substring patterns -> category) table. Evaluated top to
// bottom, first match wins, fallback when nothing matches.

use serde::{Deserialize, Serialize};

/// Category assigned when no rule matches.
pub const DEFAULT_FALLBACK: &str = "Autre";

/// A single classification rule: if the model string contains any of
/// `patterns`, the model belongs to `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub category: String,
    pub patterns: Vec<String>,
}

impl ClassificationRule {
    pub fn new<I, S>(category: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Case-sensitive substring test against every pattern.
    pub fn matches(&self, model: &str) -> bool {
        self.patterns.iter().any(|p| model.contains(p.as_str()))
    }
}

/// Ordered rule table used by the consolidation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    rules: Vec<ClassificationRule>,
    fallback: String,
}

impl Classifier {
    pub fn new(rules: Vec<ClassificationRule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// Category for `model`: the first matching rule, else the fallback.
    pub fn classify(&self, model: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matches(model))
            .map_or(self.fallback.as_str(), |rule| rule.category.as_str())
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

/// The stock inventory categories: screens, laptops, servers.
pub fn default_rules() -> Vec<ClassificationRule> {
    vec![
        ClassificationRule::new("Écran", ["Écran"]),
        ClassificationRule::new("Ordinateur Portable", ["Portable", "MacBook"]),
        ClassificationRule::new("Serveur", ["Serveur", "PowerEdge"]),
    ]
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(default_rules(), DEFAULT_FALLBACK)
    }
}

//! Shorthand rule table.
//!
//! A [`RuleTable`] is an ordered list of [`Rule`]s, each compiled into a
//! case-insensitive regex anchored on word boundaries. Rules run in
//! insertion order and each one sees the output of the previous one, so
//! the order of the table is part of its behaviour.
//!
//! ## Word boundaries
//!
//! Patterns are wrapped as `\b(?:pattern)\b` using the regex crate's
//! Unicode-aware `\b`. By the time shorthand expansion runs, character
//! filtering has already removed everything but ASCII letters, digits,
//! whitespace and a few punctuation marks, so the Unicode boundary falls
//! exactly where an ASCII one would.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use pidgin_types::{Rule, RuleError};
use regex::{NoExpand, Regex, RegexBuilder};
use tracing::debug;

/// Built-in Nigerian Pidgin / SMS shorthand, in application order.
///
/// Three kinds of entry live here:
/// - abbreviations (`u` -> `you`, `d` -> `the`)
/// - emphasis variants collapsed to one spelling (`abeggg` -> `abeg`)
/// - identity entries pinning a particle's canonical spelling
pub const PIDGIN_RULES: &[(&str, &str)] = &[
    ("u", "you"),
    ("d", "the"),
    ("abeg+", "abeg"),
    ("wetin", "wetin"),
    ("na", "na"),
    ("dey", "dey"),
    ("shaa+", "sha"),
    ("abi", "abi"),
    ("sef", "sef"),
    ("we", "we"),
    ("am", "am"),
];

static PIDGIN_TABLE: Lazy<RuleTable> = Lazy::new(|| {
    let rules = PIDGIN_RULES
        .iter()
        .map(|&(pattern, replacement)| Rule::new(pattern, replacement));
    RuleTable::new(rules).expect("built-in pidgin rules must compile")
});

/// Ordered, immutable table of whole-word shorthand rules.
///
/// Once built a table is never mutated; it is `Send + Sync` and can be
/// shared across threads by reference.
///
/// # Examples
///
/// ```
/// use pidgin_core::analyzer::rules::RuleTable;
/// use pidgin_types::Rule;
///
/// let table = RuleTable::new([Rule::new("wahala+", "wahala")]).unwrap();
/// assert_eq!(table.apply("no WAHALAAA at all"), "no wahala at all");
/// ```
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    // One anchored regex per rule, same index.
    regexes: Vec<Regex>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::pidgin().clone()
    }
}

impl RuleTable {
    /// Compiles `rules` into a table, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EmptyPattern`] for a blank pattern and
    /// [`RuleError::InvalidPattern`] when a pattern is not a valid regex.
    pub fn new<I>(rules: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = Rule>,
    {
        let mut table = Self {
            rules: Vec::new(),
            regexes: Vec::new(),
        };
        table.push_all(rules)?;
        debug!(rules = table.len(), "compiled shorthand rule table");
        Ok(table)
    }

    /// The shared built-in pidgin table.
    pub fn pidgin() -> &'static RuleTable {
        &PIDGIN_TABLE
    }

    /// Returns a new table with `extra` appended after this table's rules.
    ///
    /// # Errors
    ///
    /// Same as [`RuleTable::new`]; indices in the error count from the
    /// start of the combined table.
    pub fn extended<I>(&self, extra: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = Rule>,
    {
        let mut table = self.clone();
        let before = table.len();
        table.push_all(extra)?;
        debug!(
            base = before,
            added = table.len() - before,
            "extended shorthand rule table"
        );
        Ok(table)
    }

    fn push_all<I>(&mut self, rules: I) -> Result<(), RuleError>
    where
        I: IntoIterator<Item = Rule>,
    {
        for rule in rules {
            let regex = compile(self.rules.len(), &rule.pattern)?;
            self.rules.push(rule);
            self.regexes.push(regex);
        }
        Ok(())
    }

    /// Number of rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the table has no rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in application order.
    #[inline]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Iterates over the rules in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Runs every rule over `text`, in order, feeding each rule the
    /// previous rule's output.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_owned();

        for (rule, regex) in self.rules.iter().zip(&self.regexes) {
            let replaced = match regex.replace_all(&out, NoExpand(&rule.replacement)) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(replaced) => replaced,
            };
            out = replaced;
        }

        out
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

fn compile(index: usize, pattern: &str) -> Result<Regex, RuleError> {
    if pattern.trim().is_empty() {
        return Err(RuleError::EmptyPattern { index });
    }

    RegexBuilder::new(&format!(r"\b(?:{pattern})\b"))
        .case_insensitive(true)
        .build()
        .map_err(|source| RuleError::InvalidPattern {
            index,
            pattern: pattern.to_owned(),
            source,
        })
}

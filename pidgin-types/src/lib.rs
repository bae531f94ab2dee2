//! Core types shared across the pidgin normalizer workspace.
//!
//! This crate holds the vocabulary that both the pipeline (`pidgin-core`)
//! and its callers (`pidgin-demo`, batch drivers, dataset loaders) speak:
//!
//! - **RawInput**: a dataset value that may or may not be text
//! - **Rule**: one shorthand pattern and its canonical replacement
//! - **RuleError**: why a rule could not be compiled
//! - **Stage**: the five pipeline stages, in their fixed order

#![warn(missing_docs)]

use core::fmt;
use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A raw value handed to the normalizer.
///
/// Crowdsourced rows are messy: a "text" column can hold nulls, numbers or
/// nested arrays. Instead of faulting on those, callers wrap whatever they
/// read in a `RawInput` and the normalizer maps [`RawInput::NotText`] to an
/// empty string.
///
/// ```
/// use pidgin_types::RawInput;
///
/// assert_eq!(RawInput::from("abeg").as_text(), Some("abeg"));
/// assert_eq!(RawInput::from(None::<&str>).as_text(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput<'a> {
    /// A textual value.
    Text(Cow<'a, str>),
    /// Anything else: null, a number, a list, an object.
    NotText(NonTextKind),
}

/// What a non-text input actually was.
///
/// Only used for caller-side reporting; the normalizer treats every
/// variant the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonTextKind {
    /// Missing value (`None`, JSON `null`).
    Null,
    /// Boolean.
    Bool,
    /// Integer or float.
    Number,
    /// Sequence of values.
    Array,
    /// Key/value map.
    Object,
}

impl NonTextKind {
    /// Short lowercase name, suitable for log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            NonTextKind::Null => "null",
            NonTextKind::Bool => "bool",
            NonTextKind::Number => "number",
            NonTextKind::Array => "array",
            NonTextKind::Object => "object",
        }
    }
}

impl fmt::Display for NonTextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> RawInput<'a> {
    /// Returns the text if this input is textual.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawInput::Text(text) => Some(&**text),
            RawInput::NotText(_) => None,
        }
    }

    /// Returns `true` if the input is textual.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, RawInput::Text(_))
    }

    /// Name of the input's kind: `"string"` for text, otherwise the
    /// [`NonTextKind`] name.
    pub fn kind(&self) -> &'static str {
        match self {
            RawInput::Text(_) => "string",
            RawInput::NotText(kind) => kind.as_str(),
        }
    }
}

impl<'a> From<&'a str> for RawInput<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        RawInput::Text(Cow::Borrowed(text))
    }
}

impl From<String> for RawInput<'static> {
    #[inline]
    fn from(text: String) -> Self {
        RawInput::Text(Cow::Owned(text))
    }
}

impl<'a> From<&'a String> for RawInput<'a> {
    #[inline]
    fn from(text: &'a String) -> Self {
        RawInput::Text(Cow::Borrowed(text.as_str()))
    }
}

impl<'a, T> From<Option<T>> for RawInput<'a>
where
    T: Into<RawInput<'a>>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => RawInput::NotText(NonTextKind::Null),
        }
    }
}

impl<'a> From<&'a Value> for RawInput<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::String(text) => RawInput::Text(Cow::Borrowed(text.as_str())),
            Value::Null => RawInput::NotText(NonTextKind::Null),
            Value::Bool(_) => RawInput::NotText(NonTextKind::Bool),
            Value::Number(_) => RawInput::NotText(NonTextKind::Number),
            Value::Array(_) => RawInput::NotText(NonTextKind::Array),
            Value::Object(_) => RawInput::NotText(NonTextKind::Object),
        }
    }
}

/// One shorthand substitution rule.
///
/// `pattern` is a regular-expression fragment describing the *body* of a
/// word (for example `abeg+`). The rule table anchors it on both sides
/// with word boundaries and matches it case-insensitively, so a rule can
/// never fire inside a longer word.
///
/// `replacement` is inserted literally; `$1`-style group references are
/// not expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Word-body pattern, without boundary anchors.
    pub pattern: String,
    /// Canonical text substituted for every whole-word match.
    pub replacement: String,
}

impl Rule {
    /// Creates a rule from a pattern and its replacement.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// Returns `true` when the rule only documents a canonical spelling.
    ///
    /// Identity rules keep particles such as `na` or `dey` explicit in the
    /// table even though lowercasing already produces their canonical form.
    pub fn is_identity(&self) -> bool {
        self.pattern == self.replacement
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.pattern, self.replacement)
    }
}

/// Errors raised while compiling a rule table.
///
/// Normalization itself never fails; only building a custom table can.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A rule had an empty (or all-whitespace) pattern.
    #[error("rule #{index} has an empty pattern")]
    EmptyPattern {
        /// Position of the rule in the table.
        index: usize,
    },

    /// A rule's pattern is not a valid regular expression.
    #[error("rule #{index} has an invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Position of the rule in the table.
        index: usize,
        /// The offending pattern.
        pattern: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },
}

/// A stage of the normalization pipeline.
///
/// Stages always run in [`Stage::ALL`] order; each consumes the output of
/// the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Stage {
    /// Lowercase every character.
    CaseFold = 0,
    /// Decompose and drop combining marks.
    StripDiacritics = 1,
    /// Drop characters outside the permitted set.
    FilterChars = 2,
    /// Apply the shorthand rule table.
    ExpandShorthand = 3,
    /// Collapse whitespace runs and trim.
    CollapseWhitespace = 4,
}

impl Stage {
    /// Every stage, in pipeline order.
    pub const ALL: [Stage; 5] = [
        Stage::CaseFold,
        Stage::StripDiacritics,
        Stage::FilterChars,
        Stage::ExpandShorthand,
        Stage::CollapseWhitespace,
    ];

    /// Stable snake_case name.
    pub const fn name(self) -> &'static str {
        match self {
            Stage::CaseFold => "case_fold",
            Stage::StripDiacritics => "strip_diacritics",
            Stage::FilterChars => "filter_chars",
            Stage::ExpandShorthand => "expand_shorthand",
            Stage::CollapseWhitespace => "collapse_whitespace",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

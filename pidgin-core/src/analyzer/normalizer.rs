use pidgin_types::{RawInput, Stage};

use crate::analyzer::rules::RuleTable;
use crate::analyzer::stages::{
    collapse_whitespace, collapse_whitespace_into, expand_shorthand, filter_chars, fold_case,
    strip_diacritics,
};

/// Five-stage text normalizer for noisy crowdsourced pidgin text.
///
/// Performs the following operations, in this order:
/// - Converts all characters to lowercase (Unicode-aware)
/// - Strips diacritics via NFKD, dropping combining marks
/// - Removes characters outside ASCII letters, digits, whitespace and `. , ! ? ' " -`
/// - Expands shorthand with the whole-word [`RuleTable`]
/// - Collapses whitespace runs into single spaces and trims both ends
///
/// Normalization is total: any input, including non-text dataset values,
/// yields a `String`. The normalizer holds no mutable state, so a single
/// instance can be shared across threads.
///
/// # Examples
///
/// ```
/// use pidgin_core::analyzer::normalizer::TextNormalizer;
///
/// let normalizer = TextNormalizer::default();
/// assert_eq!(
///     normalizer.normalize("Abeggg help me  check d  time!"),
///     "abeg help me check the time!"
/// );
/// assert_eq!(normalizer.normalize(None::<&str>), "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    rules: RuleTable,
}

impl TextNormalizer {
    /// Creates a normalizer that expands shorthand with `rules`.
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// The rule table used for shorthand expansion.
    #[inline]
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Normalizes any raw value; non-text values become `""`.
    #[inline]
    pub fn normalize<'a>(&self, input: impl Into<RawInput<'a>>) -> String {
        match input.into().as_text() {
            Some(text) => self.normalize_str(text),
            None => String::new(),
        }
    }

    /// Normalizes text and returns a new String.
    pub fn normalize_str(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity, so batch
    /// drivers can keep one buffer for a whole dataset.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();

        let text = fold_case(input);
        let text = strip_diacritics(&text);
        let text = filter_chars(&text);
        let text = expand_shorthand(&text, &self.rules);
        collapse_whitespace_into(&text, out);
    }

    /// Runs the pipeline and records the output of every stage.
    ///
    /// The last entry always equals [`normalize_str`](Self::normalize_str).
    pub fn trace(&self, input: &str) -> Vec<(Stage, String)> {
        let mut steps: Vec<(Stage, String)> = Vec::with_capacity(Stage::ALL.len());
        let mut current = input.to_owned();

        for stage in Stage::ALL {
            current = self.run_stage(stage, &current);
            steps.push((stage, current.clone()));
        }

        steps
    }

    /// Runs a single stage on `input`.
    pub fn run_stage(&self, stage: Stage, input: &str) -> String {
        match stage {
            Stage::CaseFold => fold_case(input),
            Stage::StripDiacritics => strip_diacritics(input),
            Stage::FilterChars => filter_chars(input),
            Stage::ExpandShorthand => expand_shorthand(input, &self.rules),
            Stage::CollapseWhitespace => collapse_whitespace(input),
        }
    }
}

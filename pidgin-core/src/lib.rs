//! Normalization pipeline for raw crowdsourced Nigerian Pidgin text.
//!
//! Turns mixed-case, accented, slang-laden input into a canonical form
//! suitable for language-model training:
//!
//! ```
//! assert_eq!(pidgin_core::normalize("U dey go  market 2day???"), "you dey go market 2day???");
//! assert_eq!(pidgin_core::normalize(None::<&str>), "");
//! ```
//!
//! The work happens in [`analyzer`]; [`normalize`] is a shortcut over the
//! default [`TextNormalizer`] built on the shared pidgin rule table.

pub mod analyzer;

pub use analyzer::{RuleTable, TextNormalizer};
pub use pidgin_types::{NonTextKind, RawInput, Rule, RuleError, Stage};

use once_cell::sync::Lazy;

static DEFAULT_NORMALIZER: Lazy<TextNormalizer> = Lazy::new(TextNormalizer::default);

/// Normalizes `input` with the built-in pidgin rule table.
///
/// Never fails: non-text input yields an empty string.
pub fn normalize<'a>(input: impl Into<RawInput<'a>>) -> String {
    DEFAULT_NORMALIZER.normalize(input)
}

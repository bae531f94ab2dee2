//! Pipeline stages.
//!
//! Every stage is a pure `&str -> String` function. [`TextNormalizer`]
//! chains them in [`Stage::ALL`] order:
//!
//! ```text
//! fold_case -> strip_diacritics -> filter_chars -> expand_shorthand -> collapse_whitespace
//! ```
//!
//! The order matters. Filtering runs before shorthand expansion so that
//! noise such as `u***` is reduced to `u` before the whole-word rule for
//! `u` is tried.
//!
//! [`TextNormalizer`]: crate::analyzer::normalizer::TextNormalizer
//! [`Stage::ALL`]: pidgin_types::Stage::ALL

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::analyzer::rules::RuleTable;

/// Punctuation that survives [`filter_chars`].
pub const PERMITTED_PUNCTUATION: [char; 7] = ['.', ',', '!', '?', '\'', '"', '-'];

/// Returns `true` if `c` separates words.
///
/// Unicode `White_Space` plus the ASCII information separators
/// U+001C..=U+001F, which exported dataset rows use between fields.
#[inline(always)]
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Returns `true` if `c` is kept by [`filter_chars`].
#[inline(always)]
pub fn is_permitted(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_space(c) || PERMITTED_PUNCTUATION.contains(&c)
}

/// Lowercases the input using locale-independent Unicode case mapping.
///
/// ASCII-only input takes a byte-wise fast path.
pub fn fold_case(input: &str) -> String {
    if input.is_ascii() {
        input.to_ascii_lowercase()
    } else {
        input.to_lowercase()
    }
}

/// Removes diacritics by compatibility decomposition (NFKD) followed by
/// dropping every combining mark.
///
/// `é` becomes `e`, `ﬁ` becomes `fi`. Characters without a decomposition
/// (`ł`, `ß`, `đ`) pass through unchanged and are left for
/// [`filter_chars`] to judge.
pub fn strip_diacritics(input: &str) -> String {
    if input.is_ascii() {
        return input.to_owned();
    }

    input.nfkd().filter(|&c| !is_combining_mark(c)).collect()
}

/// Drops every character outside ASCII letters, ASCII digits, [`is_space`]
/// characters and [`PERMITTED_PUNCTUATION`]. Dropped characters are deleted, not
/// replaced with a space.
pub fn filter_chars(input: &str) -> String {
    input.chars().filter(|&c| is_permitted(c)).collect()
}

/// Applies every rule of `rules`, in table order, to the whole input.
pub fn expand_shorthand(input: &str, rules: &RuleTable) -> String {
    rules.apply(input)
}

/// Collapses every [`is_space`] run to a single space and trims both ends.
pub fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    collapse_whitespace_into(input, &mut out);
    out
}

/// Like [`collapse_whitespace`], but appends to `out`.
pub fn collapse_whitespace_into(input: &str, out: &mut String) {
    let mut words = input.split(is_space).filter(|word| !word.is_empty());

    if let Some(first) = words.next() {
        out.push_str(first);
        for word in words {
            out.push(' ');
            out.push_str(word);
        }
    }
}

//! Recovery of obfuscated addresses

use crate::patterns::{HIDDEN_AT_TOKENS, HIDDEN_DOT_TOKENS, PLAIN_AT, PLAIN_DOT, pattern_table};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// Substitution is one pass over an alternation of every token, longest
// first, so a token that is a substring of another can never pre-empt it.
static AT_REPLACER: LazyLock<Regex> = LazyLock::new(|| token_alternation(HIDDEN_AT_TOKENS));
static DOT_REPLACER: LazyLock<Regex> = LazyLock::new(|| token_alternation(HIDDEN_DOT_TOKENS));

fn token_alternation(tokens: &[&str]) -> Regex {
    let mut ordered = tokens.to_vec();
    ordered.sort_by_key(|token| std::cmp::Reverse(token.len()));

    let pattern = ordered
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&pattern).unwrap()
}

/// Run every obfuscation pattern over `text` and collect the raw matches.
///
/// Each pattern scans independently and duplicates are kept; callers dedupe
/// after validation.
#[must_use]
pub fn find_hidden(text: &str) -> Vec<&str> {
    let mut found = Vec::new();

    for pattern in pattern_table() {
        for raw in pattern.find_all(text) {
            debug!(variant = %pattern.variant(), raw, "Found hidden email address");
            found.push(raw);
        }
    }

    found
}

/// Rewrite hidden tokens in a raw match to `@` and `.`.
///
/// All at-tokens are replaced before any dot-token is looked at.
#[must_use]
pub fn unhide(raw: &str) -> String {
    let with_at = AT_REPLACER.replace_all(raw, PLAIN_AT);
    DOT_REPLACER.replace_all(&with_at, PLAIN_DOT).into_owned()
}

/// [`find_hidden`] followed by [`unhide`] on every match
#[must_use]
pub fn deobfuscate(text: &str) -> Vec<String> {
    find_hidden(text).into_iter().map(unhide).collect()
}

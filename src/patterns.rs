//! Obfuscation token sets and the compiled pattern table

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// The unobfuscated at sign
pub const PLAIN_AT: &str = "@";

/// The unobfuscated dot
pub const PLAIN_DOT: &str = ".";

/// Human-readable spellings of `@`.
///
/// Invariant: a spelling that contains another spelling is listed before it,
/// so that a first-match scan in this order always prefers the longer token.
pub const HIDDEN_AT_TOKENS: &[&str] = &[
    " _at_ ", "_at_", " (at) ", "(at)", " (AT) ", "(AT)", " [at] ", "[at]", " (@) ", "(@)",
    " [@] ", "[@]", " @ ",
];

/// Human-readable spellings of `.`, with the same ordering invariant
pub const HIDDEN_DOT_TOKENS: &[&str] = &[
    " (dot) ", "(dot)", " [dot] ", "[dot]", " (.) ", "(.)", " [.] ", "[.]", " . ",
];

/// One way of writing an address: which token stands for `@` and which for `.`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObfuscationVariant {
    pub at: &'static str,
    pub dot: &'static str,
}

impl ObfuscationVariant {
    #[must_use]
    pub const fn new(at: &'static str, dot: &'static str) -> Self {
        Self { at, dot }
    }

    /// Both tokens are the plain characters
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.at == PLAIN_AT && self.dot == PLAIN_DOT
    }
}

impl fmt::Display for ObfuscationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}", self.at, self.dot)
    }
}

/// Every variant that needs a pattern: hidden × hidden, plain `@` × hidden
/// dots and hidden ats × plain `.`. The plain/plain pairing is left to the
/// literal extractor.
pub fn variants() -> impl Iterator<Item = ObfuscationVariant> {
    let hidden = HIDDEN_AT_TOKENS.iter().flat_map(|&at| {
        HIDDEN_DOT_TOKENS
            .iter()
            .map(move |&dot| ObfuscationVariant::new(at, dot))
    });
    let plain_at = HIDDEN_DOT_TOKENS
        .iter()
        .map(|&dot| ObfuscationVariant::new(PLAIN_AT, dot));
    let plain_dot = HIDDEN_AT_TOKENS
        .iter()
        .map(|&at| ObfuscationVariant::new(at, PLAIN_DOT));

    hidden.chain(plain_at).chain(plain_dot)
}

/// Escape a token so a regex matches it literally.
///
/// Covers `(`, `)`, `[` and `]` along with every other regex metacharacter
/// (`.` included), so `" (.) "` only ever matches itself.
#[must_use]
pub fn escape_token(token: &str) -> String {
    regex::escape(token)
}

/// A capturing matcher for one [`ObfuscationVariant`]
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    variant: ObfuscationVariant,
    regex: Regex,
}

impl CompiledPattern {
    /// Build the matcher for `variant`.
    ///
    /// The shape is `word [class]* AT word DOT word [class]*` where the class
    /// is word characters, `(`, `)`, `+` and the characters of the dot token,
    /// so runs like `prefix (dot) hello` or `john+doe` are taken in whole.
    pub fn new(variant: ObfuscationVariant) -> Result<Self, regex::Error> {
        let class: String = variant
            .dot
            .chars()
            .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
            .collect();
        let at = escape_token(variant.at);
        let dot = escape_token(variant.dot);

        let pattern = format!(r"(\w+[\w\(\)\+{class}]*{at}\w+{dot}\w+[\w\(\)\+{class}]*)");
        Ok(Self {
            variant,
            regex: Regex::new(&pattern)?,
        })
    }

    #[must_use]
    pub const fn variant(&self) -> ObfuscationVariant {
        self.variant
    }

    /// All non-overlapping matches in `text`, left to right
    pub fn find_all<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

static PATTERN_TABLE: LazyLock<Vec<CompiledPattern>> = LazyLock::new(|| {
    variants()
        .map(|variant| CompiledPattern::new(variant).unwrap())
        .collect()
});

/// The process-wide pattern table, compiled on first use
#[must_use]
pub fn pattern_table() -> &'static [CompiledPattern] {
    &PATTERN_TABLE
}

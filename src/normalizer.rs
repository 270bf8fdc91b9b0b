//! Text normalization ahead of pattern matching
//!
//! Two rewrites run in order: HTML character references are decoded, then
//! `atob('...')` calls are replaced by the text their base64 payload decodes
//! to, which is what a browser would see once the page script has run.

use crate::config::ScrapeOptions;
use crate::error::{Result, ScrapeError};
use base64::{Engine as _, engine::general_purpose};
use regex::{Captures, Regex};
use tracing::{trace, warn};

// Numeric references may omit the semicolon. Named ones need it unless the
// name starts with one of the legacy names below.
static ENTITY_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]{1,10});?|#[xX]([0-9A-Fa-f]{1,8});?|([A-Za-z][A-Za-z0-9]{0,31})(;?))")
        .unwrap()
});

/// Names HTML5 decodes without a trailing semicolon, even mid-word
const LEGACY_NAMES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren", "deg",
    "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34", "gt",
    "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml", "yacute",
    "yen", "yuml",
];

static ATOB_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r#"atob\(['"]([A-Za-z0-9+/]+)['"]\)"#).unwrap());

/// Code points 0x80..=0x9F as Windows-1252 reads them
const WINDOWS_1252: [u32; 32] = [
    0x20AC, 0x81, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, 0x02C6, 0x2030, 0x0160, 0x2039,
    0x0152, 0x8D, 0x017D, 0x8F, 0x90, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014,
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0x9D, 0x017E, 0x0178,
];

/// Run both normalization steps: entities first, then inline base64
pub fn normalize(text: &str, options: &ScrapeOptions) -> Result<String> {
    let unescaped = unescape_entities(text);
    trace!(
        before = text.len(),
        after = unescaped.len(),
        "Decoded HTML entities"
    );
    decode_payloads(&unescaped, options.skip_undecodable_payloads)
}

/// Decode HTML character references.
///
/// Named references come from a fixed table: markup escapes, the punctuation
/// used to spell out addresses, typography and Latin-1. A reference without
/// `;` decodes through the longest legacy name it starts with, so `&lt3`
/// becomes `<3`. Unknown or malformed references are left untouched.
#[must_use]
pub fn unescape_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| {
            let decoded = if let Some(decimal) = caps.get(1) {
                Some(numeric_reference(decimal.as_str().parse().ok()))
            } else if let Some(hex) = caps.get(2) {
                Some(numeric_reference(u32::from_str_radix(hex.as_str(), 16).ok()))
            } else {
                caps.get(3).and_then(|name| {
                    let terminated = caps.get(4).is_some_and(|semi| !semi.is_empty());
                    named_or_legacy(name.as_str(), terminated)
                })
            };
            decoded.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Replace every `atob('<payload>')` call with its decoded text.
///
/// Fails on the first payload that is not base64 or not UTF-8.
pub fn decode_inline_base64(text: &str) -> Result<String> {
    decode_payloads(text, false)
}

fn decode_payloads(text: &str, skip_undecodable: bool) -> Result<String> {
    let mut output = String::with_capacity(text.len());
    let mut last_end = 0;

    for caps in ATOB_REGEX.captures_iter(text) {
        let (Some(call), Some(payload)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        output.push_str(&text[last_end..call.start()]);

        match decode_payload(payload.as_str()) {
            Ok(decoded) => {
                trace!(payload = payload.as_str(), %decoded, "Decoded atob() payload");
                output.push_str(&decoded);
            }
            Err(e) if skip_undecodable => {
                warn!(error = %e, "Leaving undecodable atob() call in place");
                output.push_str(call.as_str());
            }
            Err(e) => return Err(e),
        }
        last_end = call.end();
    }

    output.push_str(&text[last_end..]);
    Ok(output)
}

fn decode_payload(payload: &str) -> Result<String> {
    let bytes = general_purpose::STANDARD_NO_PAD
        .decode(payload)
        .map_err(|source| ScrapeError::InvalidBase64 {
            payload: payload.to_string(),
            source,
        })?;

    String::from_utf8(bytes).map_err(|source| ScrapeError::InvalidUtf8 {
        payload: payload.to_string(),
        source,
    })
}

fn numeric_reference(code: Option<u32>) -> String {
    let code = match code {
        Some(c @ 0x80..=0x9F) => WINDOWS_1252[(c - 0x80) as usize],
        Some(c) => c,
        None => 0,
    };

    let decoded = match code {
        0 => char::REPLACEMENT_CHARACTER,
        c => char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER),
    };
    decoded.to_string()
}

fn named_or_legacy(name: &str, terminated: bool) -> Option<String> {
    if terminated && let Some(decoded) = named_reference(name) {
        return Some(decoded.to_string());
    }

    (2..=name.len()).rev().find_map(|len| {
        let prefix = &name[..len];
        if !LEGACY_NAMES.contains(&prefix) {
            return None;
        }
        let decoded = named_reference(prefix)?;
        let semi = if terminated { ";" } else { "" };
        Some(format!("{decoded}{}{semi}", &name[len..]))
    })
}

fn named_reference(name: &str) -> Option<&'static str> {
    let decoded = match name {
        // Markup
        "amp" | "AMP" => "&",
        "lt" | "LT" => "<",
        "gt" | "GT" => ">",
        "quot" | "QUOT" => "\"",
        "apos" => "'",

        // Whitespace
        "nbsp" => "\u{a0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "Tab" => "\t",
        "NewLine" => "\n",
        "zwnj" => "\u{200c}",
        "zwj" => "\u{200d}",

        // Punctuation seen in hand-obfuscated addresses
        "commat" => "@",
        "period" => ".",
        "lpar" => "(",
        "rpar" => ")",
        "lsqb" | "lbrack" => "[",
        "rsqb" | "rbrack" => "]",
        "lcub" | "lbrace" => "{",
        "rcub" | "rbrace" => "}",
        "lowbar" | "UnderBar" => "_",
        "hyphen" | "dash" => "\u{2010}",
        "excl" => "!",
        "num" => "#",
        "dollar" => "$",
        "percnt" => "%",
        "ast" | "midast" => "*",
        "plus" => "+",
        "comma" => ",",
        "sol" => "/",
        "colon" => ":",
        "semi" => ";",
        "equals" => "=",
        "quest" => "?",
        "bsol" => "\\",
        "Hat" => "^",
        "grave" => "`",
        "verbar" | "vert" => "|",
        "tilde" => "\u{2dc}",

        // Typography
        "hellip" => "\u{2026}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "sbquo" => "\u{201a}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "bdquo" => "\u{201e}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "middot" => "\u{b7}",
        "bull" => "\u{2022}",
        "copy" | "COPY" => "\u{a9}",
        "reg" | "REG" => "\u{ae}",
        "trade" => "\u{2122}",
        "sect" => "\u{a7}",
        "para" => "\u{b6}",
        "deg" => "\u{b0}",
        "euro" => "\u{20ac}",
        "pound" => "\u{a3}",
        "yen" => "\u{a5}",
        "cent" => "\u{a2}",
        "times" => "\u{d7}",
        "divide" => "\u{f7}",
        "shy" => "\u{ad}",
        "iexcl" => "\u{a1}",
        "iquest" => "\u{bf}",
        "curren" => "\u{a4}",
        "brvbar" => "\u{a6}",
        "uml" => "\u{a8}",
        "ordf" => "\u{aa}",
        "not" => "\u{ac}",
        "macr" => "\u{af}",
        "plusmn" => "\u{b1}",
        "sup2" => "\u{b2}",
        "sup3" => "\u{b3}",
        "acute" => "\u{b4}",
        "micro" => "\u{b5}",
        "cedil" => "\u{b8}",
        "sup1" => "\u{b9}",
        "ordm" => "\u{ba}",
        "frac14" => "\u{bc}",
        "frac12" => "\u{bd}",
        "frac34" => "\u{be}",

        // Latin-1 letters
        "Auml" => "\u{c4}",
        "Ouml" => "\u{d6}",
        "Uuml" => "\u{dc}",
        "auml" => "\u{e4}",
        "ouml" => "\u{f6}",
        "uuml" => "\u{fc}",
        "szlig" => "\u{df}",
        "Agrave" => "\u{c0}",
        "Aacute" => "\u{c1}",
        "Acirc" => "\u{c2}",
        "Atilde" => "\u{c3}",
        "Aring" => "\u{c5}",
        "AElig" => "\u{c6}",
        "Ccedil" => "\u{c7}",
        "Egrave" => "\u{c8}",
        "Eacute" => "\u{c9}",
        "Ecirc" => "\u{ca}",
        "Euml" => "\u{cb}",
        "Igrave" => "\u{cc}",
        "Iacute" => "\u{cd}",
        "Icirc" => "\u{ce}",
        "Iuml" => "\u{cf}",
        "ETH" => "\u{d0}",
        "Ntilde" => "\u{d1}",
        "Ograve" => "\u{d2}",
        "Oacute" => "\u{d3}",
        "Ocirc" => "\u{d4}",
        "Otilde" => "\u{d5}",
        "Oslash" => "\u{d8}",
        "Ugrave" => "\u{d9}",
        "Uacute" => "\u{da}",
        "Ucirc" => "\u{db}",
        "Yacute" => "\u{dd}",
        "THORN" => "\u{de}",
        "agrave" => "\u{e0}",
        "aacute" => "\u{e1}",
        "acirc" => "\u{e2}",
        "atilde" => "\u{e3}",
        "aring" => "\u{e5}",
        "aelig" => "\u{e6}",
        "ccedil" => "\u{e7}",
        "egrave" => "\u{e8}",
        "eacute" => "\u{e9}",
        "ecirc" => "\u{ea}",
        "euml" => "\u{eb}",
        "igrave" => "\u{ec}",
        "iacute" => "\u{ed}",
        "icirc" => "\u{ee}",
        "iuml" => "\u{ef}",
        "eth" => "\u{f0}",
        "ntilde" => "\u{f1}",
        "ograve" => "\u{f2}",
        "oacute" => "\u{f3}",
        "ocirc" => "\u{f4}",
        "otilde" => "\u{f5}",
        "oslash" => "\u{f8}",
        "ugrave" => "\u{f9}",
        "uacute" => "\u{fa}",
        "ucirc" => "\u{fb}",
        "yacute" => "\u{fd}",
        "thorn" => "\u{fe}",
        "yuml" => "\u{ff}",
        _ => return None,
    };
    Some(decoded)
}

//! Literal address extraction anchored on the TLD table

use crate::tld::is_tld;
use crate::types::{EmailAddress, ResultSet};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Joins recovered candidates; neither character can occur in an address
pub const CANDIDATE_SEPARATOR: &str = "<>";

// Bounds every candidate to 64 characters before the `@` and 255 after it.
static POSSIBLE_EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".{1,64}@.{1,255}").unwrap());

// The domain is taken greedily; the TLD cut happens afterwards.
static LITERAL_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[A-Za-z0-9!#$%\&'*+\-/=?\^_`{|}\~]+(?:\.[A-Za-z0-9!#$%\&'*+\-/=?\^_`{|}\~]+)*@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)+",
    )
    .unwrap()
});

/// Collect every `@`-window of `text`, each prefixed with a space.
///
/// Text outside any window cannot hold an address, and addresses longer than
/// a window are cut to it.
#[must_use]
pub fn possible_email_windows(text: &str) -> String {
    POSSIBLE_EMAIL_REGEX
        .find_iter(text)
        .fold(String::new(), |mut windows, m| {
            windows.push(' ');
            windows.push_str(m.as_str());
            windows
        })
}

/// Extract every literal address in `text`.
///
/// A match is cut back to its rightmost label that is a known TLD; the
/// character right after an accepted address is consumed as its terminator.
#[must_use]
pub fn extract(text: &str) -> ResultSet {
    let mut found = ResultSet::new();
    let mut start = 0;

    while let Some(m) = LITERAL_EMAIL_REGEX.find_at(text, start) {
        let candidate = m.as_str();
        let Some(at) = candidate.find('@') else {
            break;
        };

        if let Some(len) = tld_anchored_len(candidate, at) {
            let accepted = &candidate[..len];
            match EmailAddress::parse(accepted) {
                Some(address) => {
                    found.insert(address);
                }
                None => trace!(accepted, "Rejected address failing validation"),
            }
            start = skip_terminator(text, m.start() + len);
        } else {
            trace!(candidate, "No known TLD in candidate");
            start = m.start() + at + 1;
        }
    }

    found
}

/// Extract from the normalized page plus the recovered candidates
#[must_use]
pub fn extract_augmented(normalized: &str, candidates: &[String]) -> ResultSet {
    let augmented = format!(
        "{normalized} {} ",
        candidates.join(CANDIDATE_SEPARATOR)
    );
    extract(&possible_email_windows(&augmented))
}

// Length of `candidate` up to and including its rightmost TLD label
fn tld_anchored_len(candidate: &str, at: usize) -> Option<usize> {
    let domain = &candidate[at + 1..];
    let mut end = domain.len();

    while let Some(dot) = domain[..end].rfind('.') {
        if is_tld(&domain[dot + 1..end]) {
            return Some(at + 1 + end);
        }
        end = dot;
    }

    None
}

fn skip_terminator(text: &str, end: usize) -> usize {
    text[end..].chars().next().map_or(end, |c| end + c.len_utf8())
}

//! Core types for scraped addresses

use crate::tld::is_tld;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Distinct addresses found in one input
pub type ResultSet = BTreeSet<EmailAddress>;

/// A validated `local@domain.tld` address.
///
/// Construction goes through [`EmailAddress::parse`], so every value has a
/// dot-separated local part, at least one domain label and a final label
/// drawn from the TLD table. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    address: String,
    at: usize,
}

impl EmailAddress {
    /// Validate `s` as a complete address
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (local, domain) = s.split_once('@')?;

        if !is_dotted(local, is_local_char) || !is_dotted(domain, is_domain_char) {
            return None;
        }

        let (_, tld) = domain.rsplit_once('.')?;
        if !is_tld(tld) {
            return None;
        }

        Some(Self {
            address: s.to_string(),
            at: local.len(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Everything before the `@`
    #[must_use]
    pub fn local_part(&self) -> &str {
        &self.address[..self.at]
    }

    /// Everything after the `@`, TLD included
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.address[self.at + 1..]
    }

    #[must_use]
    pub fn tld(&self) -> &str {
        self.domain()
            .rsplit_once('.')
            .map_or_else(|| self.domain(), |(_, tld)| tld)
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.address
    }
}

/// Characters allowed in a local part besides the separating dots
pub(crate) const fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '-'
                | '/'
                | '='
                | '?'
                | '^'
                | '_'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
        )
}

/// Characters allowed in a domain label
pub(crate) const fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

// Non-empty segments joined by single dots, no leading or trailing dot
fn is_dotted(s: &str, allowed: fn(char) -> bool) -> bool {
    !s.is_empty()
        && s
            .split('.')
            .all(|segment| !segment.is_empty() && segment.chars().all(allowed))
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

// Ordering and hashing follow the plain string so `Borrow<str>` lookups work.
impl Hash for EmailAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

impl PartialOrd for EmailAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EmailAddress {
    fn cmp(&self, other: &Self) -> Ordering {
        self.address.cmp(&other.address)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.address
    }
}

impl Borrow<str> for EmailAddress {
    fn borrow(&self) -> &str {
        &self.address
    }
}

impl PartialEq<str> for EmailAddress {
    fn eq(&self, other: &str) -> bool {
        self.address == other
    }
}

impl PartialEq<&str> for EmailAddress {
    fn eq(&self, other: &&str) -> bool {
        self.address == *other
    }
}

impl Serialize for EmailAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.address)
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("not a valid email address: {s}")))
    }
}

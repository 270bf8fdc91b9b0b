//! Output formats for scrape results

use crate::types::ResultSet;
use serde::Serialize;

/// Written in place of an address when a source yields none
pub const NOT_FOUND: &str = "[EMAIL NOT FOUND]";

/// One scraped source and the addresses found in it
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Report<'a> {
    pub source: &'a str,
    pub emails: &'a ResultSet,
}

impl<'a> Report<'a> {
    #[must_use]
    pub const fn new(source: &'a str, emails: &'a ResultSet) -> Self {
        Self { source, emails }
    }

    /// `<source>;<email>` per address, or a single `<source>;[EMAIL NOT FOUND]`
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        if self.emails.is_empty() {
            return vec![format!("{};{NOT_FOUND}", self.source)];
        }

        self.emails
            .iter()
            .map(|email| format!("{};{email}", self.source))
            .collect()
    }

    /// Compact `{"source": ..., "emails": [...]}` object on one line
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

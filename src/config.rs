//! Caller-facing scrape options

use serde::{Deserialize, Serialize};

/// Knobs for a single scrape call.
///
/// The defaults reproduce the strict engine contract: no size limit and a
/// hard failure on any inline payload that cannot be decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeOptions {
    /// Reject inputs longer than this many bytes before any matching runs
    pub max_input_bytes: Option<usize>,

    /// Leave undecodable `atob(...)` calls in place instead of failing
    pub skip_undecodable_payloads: bool,
}

impl ScrapeOptions {
    /// Load options from a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub const fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }

    #[must_use]
    pub const fn skipping_undecodable_payloads(mut self) -> Self {
        self.skip_undecodable_payloads = true;
        self
    }
}

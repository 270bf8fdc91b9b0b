// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Obfuscated Email Scraper
//!
//! Recovers every email address from a block of raw HTML, whether it is
//! written plainly, spelled out with substitutions such as `" (at) "` and
//! `"[dot]"`, or hidden behind an `atob('...')` call in an inline script.
//!
//! # Pipeline
//!
//! 1. **Normalizer** decodes HTML entities, then inline base64 payloads
//! 2. **Pattern table** holds one matcher per at/dot spelling pair
//! 3. **Deobfuscator** runs every matcher and rewrites hits to `@` and `.`
//! 4. **Extractor** pulls literal addresses out of the page plus the
//!    rewritten candidates, accepting only known top-level domains
//!
//! Each call is a pure function of its input; the TLD set and the pattern
//! table are built once and shared read-only.
//!
//! # Example
//!
//! ```rust
//! use email_scrape::scrape_emails;
//!
//! let html = r#"<a href="mailto:hello (at) world (dot) com">email me</a>"#;
//! let emails = scrape_emails(html).unwrap();
//!
//! assert!(emails.contains("hello@world.com"));
//! ```

mod config;
pub mod deobfuscator;
mod error;
pub mod extractor;
pub mod normalizer;
pub mod patterns;
pub mod report;
pub mod tld;
mod types;

pub use config::ScrapeOptions;
pub use error::{Result, ScrapeError};
pub use types::{EmailAddress, ResultSet};

use tracing::debug;

/// Scrape `html` with default options
pub fn scrape_emails(html: &str) -> Result<ResultSet> {
    scrape_emails_with(html, &ScrapeOptions::default())
}

/// Scrape `html`, returning every distinct address found.
///
/// An empty set is a normal outcome. Errors come only from the size limit
/// in `options` or from an inline payload that cannot be decoded.
pub fn scrape_emails_with(html: &str, options: &ScrapeOptions) -> Result<ResultSet> {
    if let Some(limit) = options.max_input_bytes
        && html.len() > limit
    {
        return Err(ScrapeError::InputTooLarge {
            len: html.len(),
            limit,
        });
    }

    let normalized = normalizer::normalize(html, options)?;
    let candidates = deobfuscator::deobfuscate(&normalized);
    let emails = extractor::extract_augmented(&normalized, &candidates);

    debug!(
        candidates = candidates.len(),
        found = emails.len(),
        "Scraped email addresses"
    );

    Ok(emails)
}

//! Site scrapers for collecting labeled article corpora.
//!
//! Each scraper follows a consistent two-phase pattern:
//!
//! 1. **Indexing**: Walk paginated listing pages and discover article URLs
//! 2. **Fetching**: Download and parse article content from each URL
//!
//! Fetching is strictly sequential with a fixed sleep between requests so
//! the target site is not hammered. Failed fetches are logged and skipped
//! without failing the whole run.

pub mod kosmonautix;

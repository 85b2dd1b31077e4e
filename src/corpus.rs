//! Reading and writing the JSON corpus.
//!
//! The corpus is a single pretty-printed JSON array of [`Article`] records.
//! Non-ASCII text is written verbatim; `serde_json` never escapes it, which
//! matters for a Czech-language corpus.

use crate::models::Article;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize a corpus to pretty-printed JSON.
pub fn render_corpus(articles: &[Article]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(articles)
}

/// Write the corpus to `path`, creating parent directories as needed.
#[instrument(level = "info", skip(articles), fields(path = %path.display()))]
pub async fn write_corpus(articles: &[Article], path: &Path) -> Result<(), Box<dyn Error>> {
    let json = render_corpus(articles)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, json).await?;
    let labeled = articles.iter().filter(|a| a.is_labeled()).count();
    info!(count = articles.len(), labeled, "Wrote corpus");
    Ok(())
}

/// Load a corpus previously written by the scraper.
#[instrument(level = "info", fields(path = %path.display()))]
pub async fn load_corpus(path: &Path) -> Result<Vec<Article>, Box<dyn Error>> {
    let json = fs::read_to_string(path).await?;
    let articles: Vec<Article> = serde_json::from_str(&json)?;
    info!(count = articles.len(), "Loaded corpus");
    Ok(articles)
}

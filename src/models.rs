//! Data models for scraped articles and the corpus they form.
//!
//! The corpus written by the scraper is a JSON array of [`Article`] records.
//! Every field is optional: a page with a missing or unrecognizable HTML node
//! still produces a record, with `null` in the affected field. The trainer
//! later filters out records it cannot use.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One scraped article.
///
/// The `date` field serializes as an ISO `YYYY-MM-DD` string,
/// `content_paragraphs` as an array of paragraph strings in document order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Article {
    /// Headline text of the article.
    pub title: Option<String>,
    /// Author name as printed in the article byline.
    pub author: Option<String>,
    /// Publication date parsed from the byline.
    pub date: Option<NaiveDate>,
    /// Body text, one string per paragraph, boilerplate stripped.
    pub content_paragraphs: Option<Vec<String>>,
}

impl Article {
    /// Join the body paragraphs into a single text blob for training.
    ///
    /// Returns `None` when the article has no usable content.
    pub fn text(&self) -> Option<String> {
        let paragraphs = self.content_paragraphs.as_ref()?;
        let joined = paragraphs.join("\n");
        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    /// Whether this record carries both an author label and body text.
    pub fn is_labeled(&self) -> bool {
        self.author.as_deref().is_some_and(|a| !a.is_empty()) && self.text().is_some()
    }
}

//! Dataset preparation: filter the corpus down to usable labeled documents
//! and split it into train and test sets.

use crate::models::Article;
use itertools::Itertools;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::error::Error;
use tracing::{info, warn};

/// One training document: author label plus the flattened article text.
#[derive(Debug, Clone)]
pub struct LabeledDoc {
    pub author: String,
    pub text: String,
}

/// A shuffled train/test split of the corpus.
#[derive(Debug)]
pub struct Dataset {
    pub train: Vec<LabeledDoc>,
    pub test: Vec<LabeledDoc>,
}

/// Turn a corpus into a seeded, shuffled train/test split.
///
/// Articles without an author label or without body text are dropped with
/// a warning. The split is deterministic for a given seed. Fails when the
/// test fraction is out of range, the train split would be empty, or the
/// train split covers fewer than 2 distinct authors (nothing to classify).
pub fn split_dataset(
    articles: Vec<Article>,
    test_fraction: f64,
    seed: u64,
) -> Result<Dataset, Box<dyn Error>> {
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(format!("test fraction {test_fraction} not in [0, 1)").into());
    }

    let total = articles.len();
    let mut docs: Vec<LabeledDoc> = articles
        .into_iter()
        .filter_map(|article| {
            let author = article.author.clone().filter(|a| !a.is_empty())?;
            let text = article.text()?;
            Some(LabeledDoc { author, text })
        })
        .collect();
    if docs.len() < total {
        warn!(
            dropped = total - docs.len(),
            kept = docs.len(),
            "Dropped articles without author or content"
        );
    }

    let mut rng = StdRng::seed_from_u64(seed);
    docs.shuffle(&mut rng);

    let n_test = (docs.len() as f64 * test_fraction).round() as usize;
    let n_train = docs.len() - n_test;
    if n_train == 0 {
        return Err("no training documents left after filtering and splitting".into());
    }

    let test = docs.split_off(n_train);
    let train = docs;

    let author_count = train.iter().map(|d| d.author.as_str()).unique().count();
    if author_count < 2 {
        return Err(format!(
            "train split covers {author_count} author(s); need at least 2 to classify"
        )
        .into());
    }

    info!(
        train = train.len(),
        test = test.len(),
        authors = author_count,
        "Prepared dataset"
    );
    Ok(Dataset { train, test })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(author: &str, text: &str) -> Article {
        Article {
            title: None,
            author: Some(author.to_string()),
            date: None,
            content_paragraphs: Some(vec![text.to_string()]),
        }
    }

    fn corpus() -> Vec<Article> {
        let mut articles = Vec::new();
        for i in 0..10 {
            articles.push(labeled("alice", &format!("alice text {i}")));
            articles.push(labeled("bob", &format!("bob text {i}")));
        }
        articles
    }

    #[test]
    fn test_split_sizes() {
        let dataset = split_dataset(corpus(), 0.2, 42).unwrap();
        assert_eq!(dataset.train.len(), 16);
        assert_eq!(dataset.test.len(), 4);
    }

    #[test]
    fn test_split_is_deterministic() {
        let a = split_dataset(corpus(), 0.2, 42).unwrap();
        let b = split_dataset(corpus(), 0.2, 42).unwrap();
        let texts = |ds: &Dataset| {
            ds.train
                .iter()
                .map(|d| d.text.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(texts(&a), texts(&b));
    }

    #[test]
    fn test_unlabeled_articles_are_dropped() {
        let mut articles = corpus();
        articles.push(Article {
            title: Some("bez autora".to_string()),
            author: None,
            date: None,
            content_paragraphs: Some(vec!["text".to_string()]),
        });
        articles.push(labeled("carol", "")); // empty paragraph, no text

        let before = articles.len();
        let dataset = split_dataset(articles, 0.0, 1).unwrap();
        assert_eq!(dataset.train.len() + dataset.test.len(), before - 2);
        assert!(dataset.train.iter().all(|d| d.author != "carol"));
    }

    #[test]
    fn test_single_author_is_rejected() {
        let articles: Vec<Article> =
            (0..5).map(|i| labeled("alice", &format!("text {i}"))).collect();
        assert!(split_dataset(articles, 0.2, 7).is_err());
    }

    #[test]
    fn test_bad_fraction_is_rejected() {
        assert!(split_dataset(corpus(), 1.0, 7).is_err());
        assert!(split_dataset(corpus(), -0.1, 7).is_err());
    }
}

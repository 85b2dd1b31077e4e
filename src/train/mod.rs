//! Author-classification training on a scraped corpus.
//!
//! This is the exploratory side of the project: load the corpus JSON,
//! vectorize article text with tf-idf, fit a nearest-centroid classifier
//! per author, and report held-out accuracy. The trained model is not
//! persisted anywhere.

pub mod classifier;
pub mod dataset;
pub mod features;

use crate::cli::TrainArgs;
use crate::corpus;
use classifier::NearestCentroid;
use dataset::LabeledDoc;
use features::Vectorizer;
use std::collections::BTreeMap;
use std::error::Error;
use tracing::{info, instrument};

/// Accuracy report for a held-out test split.
#[derive(Debug)]
pub struct Report {
    pub total: usize,
    pub correct: usize,
    /// Per author: (test documents, correctly classified).
    pub per_author: BTreeMap<String, (usize, usize)>,
}

impl Report {
    pub fn accuracy(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f32 / self.total as f32
        }
    }
}

/// Classify every test document and tally hits per author.
pub fn evaluate(
    vectorizer: &Vectorizer,
    model: &NearestCentroid,
    test: &[LabeledDoc],
) -> Report {
    let mut report = Report {
        total: test.len(),
        correct: 0,
        per_author: BTreeMap::new(),
    };
    for doc in test {
        let vector = vectorizer.transform(&doc.text);
        let predicted = model.predict(&vector);
        let entry = report.per_author.entry(doc.author.clone()).or_insert((0, 0));
        entry.0 += 1;
        if predicted == Some(doc.author.as_str()) {
            entry.1 += 1;
            report.correct += 1;
        }
    }
    report
}

/// Run the full training pipeline: load, split, fit, evaluate, report.
#[instrument(level = "info", skip_all, fields(corpus = %args.corpus.display()))]
pub async fn run(args: &TrainArgs) -> Result<(), Box<dyn Error>> {
    let articles = corpus::load_corpus(&args.corpus).await?;
    let dataset = dataset::split_dataset(articles, args.test_fraction, args.seed)?;
    info!(
        train = dataset.train.len(),
        test = dataset.test.len(),
        "Dataset split"
    );

    let vectorizer = Vectorizer::fit(&dataset.train);
    info!(vocabulary = vectorizer.vocabulary_len(), "Fitted vectorizer");

    let model = NearestCentroid::fit(&vectorizer, &dataset.train);
    info!(authors = model.author_count(), "Fitted nearest-centroid model");

    let report = evaluate(&vectorizer, &model, &dataset.test);
    for (author, (total, correct)) in &report.per_author {
        info!(%author, total, correct, "Per-author test results");
    }
    info!(
        total = report.total,
        correct = report.correct,
        accuracy = report.accuracy(),
        "Held-out accuracy"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(author: &str, text: &str) -> LabeledDoc {
        LabeledDoc {
            author: author.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_evaluate_on_separable_authors() {
        let train = vec![
            doc("alice", "rakety motory palivo start rakety"),
            doc("alice", "motory rakety tah palivo"),
            doc("bob", "sonda teleskop vesmír galaxie"),
            doc("bob", "teleskop galaxie snímky sonda"),
        ];
        let test = vec![
            doc("alice", "rakety palivo motory"),
            doc("bob", "galaxie teleskop snímky"),
        ];

        let vectorizer = Vectorizer::fit(&train);
        let model = NearestCentroid::fit(&vectorizer, &train);
        let report = evaluate(&vectorizer, &model, &test);

        assert_eq!(report.total, 2);
        assert_eq!(report.correct, 2);
        assert!((report.accuracy() - 1.0).abs() < f32::EPSILON);
        assert_eq!(report.per_author["alice"], (1, 1));
        assert_eq!(report.per_author["bob"], (1, 1));
    }

    #[test]
    fn test_report_accuracy_empty() {
        let report = Report {
            total: 0,
            correct: 0,
            per_author: BTreeMap::new(),
        };
        assert_eq!(report.accuracy(), 0.0);
    }
}

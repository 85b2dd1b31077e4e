//! Text vectorization: tokenization, vocabulary, and tf-idf weighting.
//!
//! The vectorizer is fitted on the train split only; tokens unseen during
//! fitting are ignored at transform time.

use crate::train::dataset::LabeledDoc;
use std::collections::HashMap;

/// Lowercase a text and split it into alphanumeric tokens of length >= 2.
///
/// Single-character tokens are mostly punctuation fallout and inflectional
/// debris; they carry no authorial signal.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Vocabulary plus inverse document frequencies fitted on a train split.
#[derive(Debug)]
pub struct Vectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    n_documents: usize,
}

impl Vectorizer {
    /// Fit vocabulary and document frequencies on the given documents.
    pub fn fit(docs: &[LabeledDoc]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for doc in docs {
            let mut seen_in_doc: Vec<usize> = tokenize(&doc.text)
                .into_iter()
                .map(|token| {
                    let next_index = vocabulary.len();
                    let index = *vocabulary.entry(token).or_insert(next_index);
                    if index == document_frequency.len() {
                        document_frequency.push(0);
                    }
                    index
                })
                .collect();
            seen_in_doc.sort_unstable();
            seen_in_doc.dedup();
            for index in seen_in_doc {
                document_frequency[index] += 1;
            }
        }

        let n_documents = docs.len();
        let idf = document_frequency
            .iter()
            .map(|&df| (n_documents as f32 / (1.0 + df as f32)).ln())
            .collect();

        Self {
            vocabulary,
            idf,
            n_documents,
        }
    }

    /// Number of distinct tokens in the fitted vocabulary.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Inverse document frequency of a token, if it is in the vocabulary.
    pub fn idf(&self, token: &str) -> Option<f32> {
        self.vocabulary.get(token).map(|&index| self.idf[index])
    }

    /// Map a text to a sparse tf-idf vector keyed by vocabulary index.
    ///
    /// Term frequency is the token count divided by the total token count
    /// of the document; out-of-vocabulary tokens are skipped.
    pub fn transform(&self, text: &str) -> HashMap<usize, f32> {
        let tokens = tokenize(text);
        let total = tokens.len();
        if total == 0 {
            return HashMap::new();
        }

        let mut counts: HashMap<usize, usize> = HashMap::new();
        for token in &tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        counts
            .into_iter()
            .map(|(index, count)| {
                let tf = count as f32 / total as f32;
                (index, tf * self.idf[index])
            })
            .collect()
    }
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
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(
            tokenize("Falcon 9 odstartoval, raketa přistála!"),
            vec!["falcon", "odstartoval", "raketa", "přistála"]
        );
    }

    #[test]
    fn test_tokenize_drops_short_tokens() {
        assert_eq!(tokenize("a b c ok"), vec!["ok"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_fit_counts_document_frequencies() {
        let docs = vec![
            doc("a", "raketa start raketa"),
            doc("a", "raketa motor"),
            doc("b", "sonda motor"),
        ];
        let vectorizer = Vectorizer::fit(&docs);
        assert_eq!(vectorizer.vocabulary_len(), 4);
        assert_eq!(vectorizer.n_documents(), 3);

        // "raketa" appears in 2 of 3 documents: idf = ln(3 / (1 + 2)) = 0
        assert!(vectorizer.idf("raketa").unwrap().abs() < 1e-6);
        // "sonda" appears in 1 of 3: idf = ln(3 / 2)
        let expected = (3.0f32 / 2.0).ln();
        assert!((vectorizer.idf("sonda").unwrap() - expected).abs() < 1e-6);
        assert_eq!(vectorizer.idf("neznámé"), None);
    }

    #[test]
    fn test_transform_weights_by_tf_and_idf() {
        let docs = vec![
            doc("a", "raketa start"),
            doc("b", "sonda teleskop"),
            doc("b", "sonda data"),
        ];
        let vectorizer = Vectorizer::fit(&docs);
        let vector = vectorizer.transform("raketa raketa teleskop");

        // tf(raketa) = 2/3, tf(teleskop) = 1/3
        let raketa_idf = vectorizer.idf("raketa").unwrap();
        let teleskop_idf = vectorizer.idf("teleskop").unwrap();
        let weights: Vec<f32> = vector.values().copied().collect();
        assert_eq!(vector.len(), 2);
        assert!(
            weights
                .iter()
                .any(|w| (w - 2.0 / 3.0 * raketa_idf).abs() < 1e-6)
        );
        assert!(
            weights
                .iter()
                .any(|w| (w - 1.0 / 3.0 * teleskop_idf).abs() < 1e-6)
        );
    }

    #[test]
    fn test_transform_skips_unknown_tokens() {
        let docs = vec![doc("a", "raketa start"), doc("b", "sonda motor")];
        let vectorizer = Vectorizer::fit(&docs);
        assert!(vectorizer.transform("úplně neznámá slova").is_empty());
        assert!(vectorizer.transform("").is_empty());
    }
}

//! Nearest-centroid author classifier over sparse tf-idf vectors.
//!
//! Each author gets the mean tf-idf vector of their training documents;
//! a document is assigned to the author whose centroid has the highest
//! cosine similarity with it.

use crate::train::dataset::LabeledDoc;
use crate::train::features::Vectorizer;
use std::collections::HashMap;

/// Sparse vector keyed by vocabulary index.
type SparseVec = HashMap<usize, f32>;

/// Per-author centroids in tf-idf space.
#[derive(Debug)]
pub struct NearestCentroid {
    authors: Vec<String>,
    centroids: Vec<SparseVec>,
}

impl NearestCentroid {
    /// Compute one centroid per author from the training documents.
    pub fn fit(vectorizer: &Vectorizer, train: &[LabeledDoc]) -> Self {
        let mut sums: HashMap<String, (SparseVec, usize)> = HashMap::new();
        for doc in train {
            let vector = vectorizer.transform(&doc.text);
            let (sum, count) = sums.entry(doc.author.clone()).or_default();
            for (index, weight) in vector {
                *sum.entry(index).or_insert(0.0) += weight;
            }
            *count += 1;
        }

        let mut authors = Vec::with_capacity(sums.len());
        let mut centroids = Vec::with_capacity(sums.len());
        for (author, (mut sum, count)) in sums {
            for weight in sum.values_mut() {
                *weight /= count as f32;
            }
            authors.push(author);
            centroids.push(sum);
        }

        Self { authors, centroids }
    }

    /// Number of authors the model distinguishes.
    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    /// Author whose centroid is most similar to `vector`.
    ///
    /// Returns `None` for an empty vector or when every centroid has zero
    /// similarity, since a zero-overlap prediction would be noise.
    pub fn predict(&self, vector: &SparseVec) -> Option<&str> {
        if vector.is_empty() {
            return None;
        }
        let mut best: Option<(&str, f32)> = None;
        for (author, centroid) in self.authors.iter().zip(&self.centroids) {
            let similarity = cosine(vector, centroid);
            if similarity > 0.0 && best.is_none_or(|(_, s)| similarity > s) {
                best = Some((author, similarity));
            }
        }
        best.map(|(author, _)| author)
    }
}

/// Cosine similarity between two sparse vectors; 0 when either is zero.
fn cosine(a: &SparseVec, b: &SparseVec) -> f32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f32 = small
        .iter()
        .filter_map(|(index, weight)| large.get(index).map(|other| weight * other))
        .sum();
    let norm_a: f32 = a.values().map(|w| w * w).sum::<f32>().sqrt();
    let norm_b: f32 = b.values().map(|w| w * w).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

//! Corpus Vectorizer — TF-IDF over one candidate bag plus N job bags.
//!
//! A `VectorSpace` is only meaningful for the corpus it was fitted on: the
//! vocabulary depends on which jobs are present, so it is rebuilt per request
//! and never reused across requests.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::matching::keywords::KeywordBag;

/// Ordered texts to vectorize. Index 0 is the candidate, 1..=N are the jobs
/// in the order they were supplied.
#[derive(Debug, Clone)]
pub struct Corpus {
    documents: Vec<String>,
}

impl Corpus {
    pub fn new(candidate: &KeywordBag, jobs: &[KeywordBag]) -> Self {
        let documents = std::iter::once(candidate)
            .chain(jobs)
            .map(KeywordBag::to_string)
            .collect();
        Self { documents }
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }
}

/// Fitted TF-IDF model: vocabulary, idf weights and one row per corpus entry.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    vocabulary: BTreeMap<String, usize>,
    #[cfg(test)]
    idf: Vec<f64>,
    vectors: Vec<Vec<f64>>,
}

impl VectorSpace {
    /// Builds the vocabulary from `corpus` and weights every entry.
    ///
    /// Weight of term t in document d:
    /// `tf(t, d) = count(t, d) / len(d)`,
    /// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`,
    /// then each row is L2-normalized. Rows of empty documents stay all-zero.
    pub fn fit(corpus: &Corpus) -> Self {
        let tokenized: Vec<Vec<&str>> = corpus
            .documents()
            .iter()
            .map(|doc| doc.split_whitespace().collect())
            .collect();

        let vocabulary: BTreeMap<String, usize> = tokenized
            .iter()
            .flatten()
            .copied()
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .enumerate()
            .map(|(column, term)| (term.to_string(), column))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let distinct: BTreeSet<&str> = tokens.iter().copied().collect();
            for term in distinct {
                document_frequency[vocabulary[term]] += 1;
            }
        }

        let n = tokenized.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors = tokenized
            .iter()
            .map(|tokens| weigh(tokens, &vocabulary, &idf))
            .collect();

        Self {
            vocabulary,
            #[cfg(test)]
            idf,
            vectors,
        }
    }

    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    #[cfg(test)]
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&column| self.idf[column])
    }

    /// Vector of the candidate (corpus index 0).
    pub fn candidate(&self) -> &[f64] {
        self.vectors.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Vectors of the jobs (corpus indices 1..=N), in corpus order.
    pub fn jobs(&self) -> &[Vec<f64>] {
        self.vectors.get(1..).unwrap_or(&[])
    }
}

fn weigh(tokens: &[&str], vocabulary: &BTreeMap<String, usize>, idf: &[f64]) -> Vec<f64> {
    let mut row = vec![0.0; vocabulary.len()];
    if tokens.is_empty() {
        return row;
    }

    let mut counts: HashMap<usize, usize> = HashMap::new();
    for term in tokens {
        *counts.entry(vocabulary[*term]).or_insert(0) += 1;
    }

    let length = tokens.len() as f64;
    for (column, count) in counts {
        row[column] = (count as f64 / length) * idf[column];
    }

    let norm = row.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|w| *w /= norm);
    }
    row
}

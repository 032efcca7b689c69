//! BM25-Okapi scoring over a pre-tokenized corpus.

use std::collections::HashMap;

use fundgraph_core::config::SparseConfig;
use rayon::prelude::*;

/// BM25 free parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
    /// Negative IDFs are floored to `epsilon * average_idf`.
    pub epsilon: f64,
}

impl From<&SparseConfig> for Bm25Params {
    fn from(config: &SparseConfig) -> Self {
        Self {
            k1: config.k1,
            b: config.b,
            epsilon: config.epsilon,
        }
    }
}

/// Term statistics of one corpus.
#[derive(Debug, Clone, Default)]
pub(crate) struct Bm25Model {
    term_freqs: Vec<HashMap<String, u32>>,
    doc_lens: Vec<usize>,
    avg_doc_len: f64,
    idf: HashMap<String, f64>,
}

impl Bm25Model {
    pub(crate) fn fit(corpus: &[Vec<String>], params: Bm25Params) -> Self {
        let term_freqs: Vec<HashMap<String, u32>> = corpus
            .par_iter()
            .map(|doc| {
                let mut tf: HashMap<String, u32> = HashMap::new();
                for term in doc {
                    *tf.entry(term.clone()).or_default() += 1;
                }
                tf
            })
            .collect();
        let doc_lens: Vec<usize> = corpus.iter().map(Vec::len).collect();
        let total: usize = doc_lens.iter().sum();
        let avg_doc_len = if corpus.is_empty() {
            0.0
        } else {
            total as f64 / corpus.len() as f64
        };

        let mut doc_freq: HashMap<&str, u32> = HashMap::new();
        for tf in &term_freqs {
            for term in tf.keys() {
                *doc_freq.entry(term.as_str()).or_default() += 1;
            }
        }

        let n = corpus.len() as f64;
        let mut idf: HashMap<String, f64> = HashMap::with_capacity(doc_freq.len());
        let mut idf_sum = 0.0;
        let mut negative: Vec<String> = Vec::new();
        for (term, &freq) in &doc_freq {
            let freq = f64::from(freq);
            let value = (n - freq + 0.5).ln() - (freq + 0.5).ln();
            idf_sum += value;
            if value < 0.0 {
                negative.push((*term).to_string());
            }
            idf.insert((*term).to_string(), value);
        }
        if !idf.is_empty() {
            let floor = params.epsilon * idf_sum / idf.len() as f64;
            for term in negative {
                idf.insert(term, floor);
            }
        }

        Self {
            term_freqs,
            doc_lens,
            avg_doc_len,
            idf,
        }
    }

    /// One score per corpus document, in corpus order. Repeated query
    /// terms count once per occurrence.
    pub(crate) fn scores(&self, query: &[String], params: Bm25Params) -> Vec<f64> {
        let weighted: Vec<(&str, f64)> = query
            .iter()
            .filter_map(|q| self.idf.get(q).map(|&idf| (q.as_str(), idf)))
            .collect();

        self.term_freqs
            .par_iter()
            .zip(self.doc_lens.par_iter())
            .map(|(tf, &len)| {
                let norm = if self.avg_doc_len > 0.0 {
                    len as f64 / self.avg_doc_len
                } else {
                    0.0
                };
                weighted
                    .iter()
                    .map(|&(term, idf)| {
                        let Some(&f) = tf.get(term) else {
                            return 0.0;
                        };
                        let f = f64::from(f);
                        idf * (f * (params.k1 + 1.0))
                            / (f + params.k1 * (1.0 - params.b + params.b * norm))
                    })
                    .sum()
            })
            .collect()
    }

    pub(crate) fn avg_doc_len(&self) -> f64 {
        self.avg_doc_len
    }

    pub(crate) fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }
}

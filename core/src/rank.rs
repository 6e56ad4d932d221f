use std::cmp::Ordering;
use std::collections::HashMap;

use crate::query::tokenize;
use crate::store::ArticleStore;
use crate::{Article, ArticleId};

/// Per-term posting statistics scanned from a store snapshot: for each term,
/// the articles containing it and the raw occurrence count in each body.
#[derive(Debug, PartialEq)]
pub struct CorpusStats {
    num_docs: usize,
    postings: HashMap<String, HashMap<ArticleId, u32>>,
}

impl CorpusStats {
    /// Rebuild statistics by scanning every stored article. Cheap for the
    /// small corpora this engine targets; callers may hold on to the result
    /// for the lifetime of one snapshot.
    pub fn scan(store: &ArticleStore) -> Self {
        let mut postings: HashMap<String, HashMap<ArticleId, u32>> = HashMap::new();
        let articles = store.all();
        for article in &articles {
            for term in tokenize(&article.body) {
                *postings
                    .entry(term)
                    .or_default()
                    .entry(article.id.clone())
                    .or_insert(0) += 1;
            }
        }
        Self { num_docs: articles.len(), postings }
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    /// Number of articles containing `term` at least once.
    pub fn df(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, |m| m.len())
    }

    /// Raw occurrence count of `term` in the given article's body.
    pub fn tf(&self, term: &str, id: &str) -> u32 {
        self.postings
            .get(term)
            .and_then(|m| m.get(id))
            .copied()
            .unwrap_or(0)
    }

    /// idf(term) = ln(N / (1 + df)). The +1 keeps terms absent from the
    /// corpus finite; they then contribute 0 through a zero tf.
    pub fn idf(&self, term: &str) -> f64 {
        (self.num_docs as f64 / (1.0 + self.df(term) as f64)).ln()
    }

    /// Distinct terms present in the corpus.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(|s| s.as_str())
    }

    /// Postings must always be derivable from the store: every posting id
    /// resolves to a stored article and a fresh scan reproduces the same
    /// statistics. A mismatch means the maintenance code is broken.
    pub fn is_consistent_with(&self, store: &ArticleStore) -> bool {
        let all_ids_stored = self
            .postings
            .values()
            .flat_map(|m| m.keys())
            .all(|id| store.find(id).is_some());
        all_ids_stored && Self::scan(store) == *self
    }
}

/// Score every article for the given terms and return the hits:
/// score = sum over terms of tf * idf, filtered to score > 0, descending by
/// score with ties broken by ascending article id.
pub fn rank<'a>(
    store: &'a ArticleStore,
    stats: &CorpusStats,
    terms: &[String],
) -> Vec<(&'a Article, f64)> {
    let mut scores: HashMap<&str, f64> = HashMap::new();
    for term in terms {
        let Some(per_doc) = stats.postings.get(term.as_str()) else {
            continue;
        };
        let idf = stats.idf(term);
        for (id, tf) in per_doc {
            *scores.entry(id.as_str()).or_insert(0.0) += f64::from(*tf) * idf;
        }
    }

    let mut ranked: Vec<(&Article, f64)> = scores
        .into_iter()
        .filter(|&(_, score)| score > 0.0)
        .filter_map(|(id, score)| store.find(id).map(|a| (a, score)))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.id.cmp(&b.0.id))
    });
    ranked
}

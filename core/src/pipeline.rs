use crate::fuzzy::FuzzyMatcher;
use crate::query::QueryProcessor;
use crate::rank::{rank, CorpusStats};
use crate::store::ArticleStore;
use crate::Article;

/// Orchestrates tokenization, fuzzy correction and ranking against one index
/// snapshot. Stateless: the result is a pure function of the query text and
/// the snapshot.
pub struct QueryPipeline<'a> {
    processor: &'a QueryProcessor,
    store: &'a ArticleStore,
    matcher: FuzzyMatcher,
}

impl<'a> QueryPipeline<'a> {
    pub fn new(processor: &'a QueryProcessor, store: &'a ArticleStore) -> Self {
        Self { processor, store, matcher: FuzzyMatcher::default() }
    }

    pub fn with_matcher(mut self, matcher: FuzzyMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Process the raw query, substitute terms unknown to the corpus with
    /// their closest vocabulary term within the fuzzy threshold, then rank.
    /// An empty processed-term sequence yields an empty result.
    pub fn search(&self, raw_query: &str) -> Vec<(&'a Article, f64)> {
        let mut terms = self.processor.process_query(raw_query);
        if terms.is_empty() {
            return Vec::new();
        }

        let stats = CorpusStats::scan(self.store);
        for term in terms.iter_mut() {
            if stats.df(term) == 0 {
                if let Some(substitute) = self.matcher.best_match(term, stats.vocabulary()) {
                    tracing::debug!(from = %term, to = substitute, "fuzzy term substitution");
                    *term = substitute.to_string();
                }
            }
        }

        rank(self.store, &stats, &terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Article;

    fn seeded_store() -> ArticleStore {
        let mut store = ArticleStore::new();
        for (id, body) in [
            ("a", "botnet command and control traffic"),
            ("b", "phishing campaign spoofs bank portals"),
            ("c", "kernel patch closes privilege escalation"),
        ] {
            store.insert(Article {
                id: id.to_string(),
                title: id.to_string(),
                url: format!("https://example.com/{id}"),
                topic: "Security".to_string(),
                body: body.to_string(),
                fetched_at: 0,
            });
        }
        store
    }

    #[test]
    fn typo_is_corrected_against_corpus_vocabulary() {
        let processor = QueryProcessor::new();
        let store = seeded_store();
        let hits = QueryPipeline::new(&processor, &store).search("phising");
        assert!(!hits.is_empty());
        assert_eq!(hits[0].0.id, "b");
    }

    #[test]
    fn empty_query_yields_empty_result() {
        let processor = QueryProcessor::new();
        let store = seeded_store();
        let pipeline = QueryPipeline::new(&processor, &store);
        assert!(pipeline.search("").is_empty());
        assert!(pipeline.search("what is a").is_empty());
    }

    #[test]
    fn unmatchable_term_stays_empty() {
        let processor = QueryProcessor::new();
        let store = seeded_store();
        let hits = QueryPipeline::new(&processor, &store).search("cryptojacking");
        assert!(hits.is_empty());
    }
}

use parking_lot::RwLock;

use crate::pipeline::QueryPipeline;
use crate::query::{tokenize, QueryProcessor};
use crate::store::ArticleStore;
use crate::topics::TopicHierarchy;
use crate::trie::Trie;
use crate::{Article, RawArticle};

/// Label of the topic node every ingested topic hangs under.
pub const TOPIC_ROOT: &str = "Articles";

struct Index {
    store: ArticleStore,
    topics: TopicHierarchy,
    vocabulary: Trie,
}

/// Facade over the whole index. Ingestion takes the write lock and is
/// serialized; search, lookup and introspection take read locks and observe a
/// consistent snapshot. No I/O happens under the lock.
pub struct SearchEngine {
    processor: QueryProcessor,
    index: RwLock<Index>,
}

impl SearchEngine {
    pub fn new() -> Self {
        let mut topics = TopicHierarchy::new();
        topics.add_topic(TOPIC_ROOT, None, Vec::new());
        Self {
            processor: QueryProcessor::new(),
            index: RwLock::new(Index {
                store: ArticleStore::new(),
                topics,
                vocabulary: Trie::new(),
            }),
        }
    }

    /// Ingest raw records, deriving identifiers from their URLs. Returns the
    /// number of newly stored articles; already-present identifiers merge
    /// idempotently.
    pub fn ingest(&self, records: Vec<RawArticle>) -> usize {
        self.ingest_articles(records.into_iter().map(RawArticle::into_article).collect())
    }

    /// Ingest fully-formed articles, preserving their identifiers and
    /// timestamps. Used when reloading a persisted article set.
    pub fn ingest_articles(&self, articles: Vec<Article>) -> usize {
        let mut guard = self.index.write();
        let Index { store, topics, vocabulary } = &mut *guard;
        let mut added = 0;
        for article in articles {
            if store.find(&article.id).is_some() {
                tracing::debug!(id = %article.id, "duplicate ingest ignored");
                continue;
            }
            for term in tokenize(&article.title).into_iter().chain(tokenize(&article.body)) {
                vocabulary.insert(&term);
            }
            topics.add_topic(&article.topic, Some(TOPIC_ROOT), vec![article.id.clone()]);
            store.insert(article);
            added += 1;
        }
        added
    }

    /// Relevance-ranked results for a free-text query.
    pub fn search(&self, raw_query: &str) -> Vec<(Article, f64)> {
        let index = self.index.read();
        QueryPipeline::new(&self.processor, &index.store)
            .search(raw_query)
            .into_iter()
            .map(|(article, score)| (article.clone(), score))
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<Article> {
        self.index.read().store.find(id).cloned()
    }

    pub fn count(&self) -> usize {
        self.index.read().store.count()
    }

    /// Every stored article in identifier order. This is the persistence
    /// contract surface: the caller serializes these records.
    pub fn articles(&self) -> Vec<Article> {
        self.index.read().store.all().into_iter().cloned().collect()
    }

    /// Articles filed under `topic` and all of its subtopics.
    pub fn articles_under(&self, topic: &str) -> Vec<Article> {
        let index = self.index.read();
        index
            .topics
            .articles_under(topic)
            .into_iter()
            .filter_map(|id| {
                let found = index.store.find(&id).cloned();
                debug_assert!(found.is_some(), "topic tree references unknown article {id}");
                found
            })
            .collect()
    }

    pub fn vocab_has_prefix(&self, prefix: &str) -> bool {
        self.index.read().vocabulary.has_prefix(prefix)
    }

    pub fn vocab_words(&self) -> Vec<String> {
        self.index.read().vocabulary.collect_all_words()
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

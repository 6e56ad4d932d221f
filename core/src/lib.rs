pub mod engine;
pub mod fuzzy;
pub mod history;
pub mod persist;
pub mod pipeline;
pub mod query;
pub mod rank;
pub mod store;
pub mod topics;
pub mod trie;

pub use engine::SearchEngine;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

pub type ArticleId = String;

/// A stored article. Immutable once indexed, except for topic reassignment
/// performed by the ingestion path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub url: String,
    pub topic: String,
    pub body: String,
    /// Unix seconds at ingestion time.
    pub fetched_at: i64,
}

/// Raw ingestion input as produced by a fetching collaborator. The engine
/// derives the stable identifier before storing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: String,
    pub url: String,
    pub topic: String,
    pub body: String,
}

/// Stable identifier for an article: sha1 hex digest of its source URL.
pub fn derive_id(url: &str) -> ArticleId {
    let mut hasher = Sha1::new();
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl RawArticle {
    pub fn into_article(self) -> Article {
        Article {
            id: derive_id(&self.url),
            title: self.title,
            url: self.url,
            topic: self.topic,
            body: self.body,
            fetched_at: time::OffsetDateTime::now_utc().unix_timestamp(),
        }
    }
}

use std::fs::{create_dir_all, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::Article;

/// Flat persisted shape of one article. The storage collaborator owns the
/// file and its I/O; this module owns the record shape and its validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub topic: String,
    pub body: String,
    pub fetched_at: i64,
}

impl ArticleRecord {
    fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.url.is_empty()
    }
}

impl From<Article> for ArticleRecord {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            title: a.title,
            url: a.url,
            topic: a.topic,
            body: a.body,
            fetched_at: a.fetched_at,
        }
    }
}

impl From<ArticleRecord> for Article {
    fn from(r: ArticleRecord) -> Self {
        Self {
            id: r.id,
            title: r.title,
            url: r.url,
            topic: r.topic,
            body: r.body,
            fetched_at: r.fetched_at,
        }
    }
}

pub struct StorePaths {
    pub root: PathBuf,
}

impl StorePaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn articles(&self) -> PathBuf {
        self.root.join("articles.json")
    }
    pub fn history(&self) -> PathBuf {
        self.root.join("search_history.json")
    }
}

/// Write the article set as a JSON array, in the order given (callers pass
/// identifier order from the store).
pub fn save_articles(paths: &StorePaths, articles: &[Article]) -> Result<()> {
    create_dir_all(&paths.root)?;
    let records: Vec<ArticleRecord> = articles.iter().cloned().map(ArticleRecord::from).collect();
    let mut f = File::create(paths.articles())?;
    f.write_all(serde_json::to_string_pretty(&records)?.as_bytes())?;
    Ok(())
}

/// Load the persisted article set. Each array element is decoded on its own:
/// a malformed or invalid record is skipped with a diagnostic and loading
/// continues with the rest.
pub fn load_articles(paths: &StorePaths) -> Result<Vec<Article>> {
    let f = File::open(paths.articles())?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))?;
    let serde_json::Value::Array(items) = json else {
        anyhow::bail!("articles file is not a JSON array");
    };

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<ArticleRecord>(item) {
            Ok(record) if record.is_valid() => out.push(Article::from(record)),
            Ok(record) => {
                tracing::warn!(index = i, id = %record.id, "dropping invalid article record");
            }
            Err(err) => {
                tracing::warn!(index = i, %err, "skipping corrupt article record");
            }
        }
    }
    Ok(out)
}

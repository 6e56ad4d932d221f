use std::fs;
use std::path::PathBuf;

use anyhow::Result;

/// Most recent queries kept on disk.
pub const MAX_HISTORY: usize = 20;

/// Persistent recent-query list, newest first. Constructed with an explicit
/// storage path so callers (and tests) isolate state per directory instead of
/// sharing a process-wide file.
pub struct SearchHistory {
    path: PathBuf,
}

impl SearchHistory {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// A missing or unreadable file is treated as empty history.
    pub fn load(&self) -> Vec<String> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(history) => history,
            Err(err) => {
                tracing::warn!(%err, "history file unreadable, starting fresh");
                Vec::new()
            }
        }
    }

    pub fn save(&self, history: &[String]) -> Result<()> {
        let capped = &history[..history.len().min(MAX_HISTORY)];
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(capped)?)?;
        Ok(())
    }

    /// Record a query: deduplicated to the front, capped at `MAX_HISTORY`,
    /// persisted. Returns the updated list.
    pub fn add(&self, query: &str) -> Result<Vec<String>> {
        let mut history = self.load();
        history.retain(|q| q != query);
        history.insert(0, query.to_string());
        history.truncate(MAX_HISTORY);
        self.save(&history)?;
        Ok(history)
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

use std::cmp::Ordering;

use crate::Article;

/// Comparison key for the ordered store, injected once at construction.
pub type KeyFn = fn(&Article) -> &str;

#[derive(Debug)]
struct Node {
    article: Article,
    left: Option<u32>,
    right: Option<u32>,
}

/// Deduplicated, ordered article storage: a binary search tree over arena
/// nodes, keyed by whatever `KeyFn` extracts (article id by default).
/// Enumeration order is key order, not insertion order. Skewed trees from
/// monotone keys are accepted; correctness over balance.
#[derive(Debug)]
pub struct ArticleStore {
    nodes: Vec<Node>,
    root: Option<u32>,
    key: KeyFn,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self::with_key(|a| a.id.as_str())
    }

    pub fn with_key(key: KeyFn) -> Self {
        Self { nodes: Vec::new(), root: None, key }
    }

    /// Idempotent insert: if the key is already present the existing entry is
    /// returned unchanged and no node is created.
    pub fn insert(&mut self, article: Article) -> &Article {
        let Some(root) = self.root else {
            self.nodes.push(Node { article, left: None, right: None });
            self.root = Some(0);
            return &self.nodes[0].article;
        };

        let mut cur = root as usize;
        loop {
            match (self.key)(&article).cmp((self.key)(&self.nodes[cur].article)) {
                Ordering::Equal => return &self.nodes[cur].article,
                Ordering::Less => match self.nodes[cur].left {
                    Some(next) => cur = next as usize,
                    None => {
                        let idx = self.nodes.len() as u32;
                        self.nodes.push(Node { article, left: None, right: None });
                        self.nodes[cur].left = Some(idx);
                        return &self.nodes[idx as usize].article;
                    }
                },
                Ordering::Greater => match self.nodes[cur].right {
                    Some(next) => cur = next as usize,
                    None => {
                        let idx = self.nodes.len() as u32;
                        self.nodes.push(Node { article, left: None, right: None });
                        self.nodes[cur].right = Some(idx);
                        return &self.nodes[idx as usize].article;
                    }
                },
            }
        }
    }

    pub fn find(&self, key: &str) -> Option<&Article> {
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = &self.nodes[idx as usize];
            match key.cmp((self.key)(&node.article)) {
                Ordering::Equal => return Some(&node.article),
                Ordering::Less => cur = node.left,
                Ordering::Greater => cur = node.right,
            }
        }
        None
    }

    /// All articles in ascending key order. Iterative in-order traversal with
    /// an explicit stack.
    pub fn all(&self) -> Vec<&Article> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<u32> = Vec::new();
        let mut cur = self.root;
        loop {
            while let Some(idx) = cur {
                stack.push(idx);
                cur = self.nodes[idx as usize].left;
            }
            let Some(idx) = stack.pop() else { break };
            out.push(&self.nodes[idx as usize].article);
            cur = self.nodes[idx as usize].right;
        }
        out
    }

    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for ArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, title: &str) -> Article {
        Article {
            id: id.to_string(),
            title: title.to_string(),
            url: format!("https://example.com/{id}"),
            topic: "Security".to_string(),
            body: String::new(),
            fetched_at: 0,
        }
    }

    #[test]
    fn insert_is_idempotent() {
        let mut store = ArticleStore::new();
        store.insert(article("b1", "first"));
        let kept = store.insert(article("b1", "second")).title.clone();
        assert_eq!(store.count(), 1);
        assert_eq!(kept, "first");
        assert_eq!(store.find("b1").unwrap().title, "first");
    }

    #[test]
    fn enumeration_is_key_ordered() {
        let mut store = ArticleStore::new();
        for id in ["c", "a", "d", "b"] {
            store.insert(article(id, id));
        }
        let ids: Vec<&str> = store.all().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn skewed_inserts_stay_correct() {
        let mut store = ArticleStore::new();
        for i in 0..50 {
            store.insert(article(&format!("{i:03}"), "t"));
        }
        assert_eq!(store.count(), 50);
        assert!(store.find("049").is_some());
        assert!(store.find("050").is_none());
        assert_eq!(store.all().first().unwrap().id, "000");
    }

    #[test]
    fn custom_key_function() {
        let mut store = ArticleStore::with_key(|a| a.title.as_str());
        store.insert(article("x", "zebra"));
        store.insert(article("y", "alpha"));
        let titles: Vec<&str> = store.all().iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "zebra"]);
        assert!(store.find("zebra").is_some());
    }
}

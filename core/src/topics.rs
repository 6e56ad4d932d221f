use std::collections::HashMap;

use crate::ArticleId;

#[derive(Debug)]
struct TopicNode {
    label: String,
    articles: Vec<ArticleId>,
    children: Vec<usize>,
    parent: Option<usize>,
}

/// Tree aggregating article ids under topic labels. Nodes live in an arena
/// and refer to each other by index, so parent links are lookups, never
/// ownership, and no cycle can form.
#[derive(Debug, Default)]
pub struct TopicHierarchy {
    nodes: Vec<TopicNode>,
    by_label: HashMap<String, usize>,
    root: Option<usize>,
}

impl TopicHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a topic. An existing label appends the supplied articles to its
    /// direct list and is otherwise a no-op. A new label attaches under
    /// `parent` when that parent exists; the first parentless topic becomes
    /// the root. An unknown parent is treated as "no parent", which orphans
    /// the node once a root exists.
    pub fn add_topic(&mut self, label: &str, parent: Option<&str>, articles: Vec<ArticleId>) {
        if let Some(&idx) = self.by_label.get(label) {
            self.nodes[idx].articles.extend(articles);
            return;
        }

        let parent_idx = parent.and_then(|p| self.by_label.get(p).copied());
        if let Some(p) = parent {
            if parent_idx.is_none() {
                tracing::warn!(topic = label, parent = p, "unknown parent topic, attaching without one");
            }
        }

        let idx = self.nodes.len();
        self.nodes.push(TopicNode {
            label: label.to_string(),
            articles,
            children: Vec::new(),
            parent: parent_idx,
        });
        self.by_label.insert(label.to_string(), idx);

        match parent_idx {
            Some(p) => self.nodes[p].children.push(idx),
            None => {
                if self.root.is_none() {
                    self.root = Some(idx);
                }
            }
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    pub fn root(&self) -> Option<&str> {
        self.root.map(|i| self.nodes[i].label.as_str())
    }

    pub fn parent_of(&self, label: &str) -> Option<&str> {
        let &idx = self.by_label.get(label)?;
        self.nodes[idx].parent.map(|p| self.nodes[p].label.as_str())
    }

    /// Article ids directly under `label` plus those of every descendant,
    /// depth-first in child-list order. Unknown labels yield nothing.
    pub fn articles_under(&self, label: &str) -> Vec<ArticleId> {
        let Some(&start) = self.by_label.get(label) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            out.extend(node.articles.iter().cloned());
            // reversed push so the first child is visited first
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<ArticleId> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn subtopic_articles_roll_up() {
        let mut tree = TopicHierarchy::new();
        tree.add_topic("Malware", None, Vec::new());
        tree.add_topic("Ransomware", Some("Malware"), ids(&["a1"]));
        assert!(tree.articles_under("Malware").contains(&"a1".to_string()));
        assert_eq!(tree.root(), Some("Malware"));
        assert_eq!(tree.parent_of("Ransomware"), Some("Malware"));
    }

    #[test]
    fn existing_label_merges_articles() {
        let mut tree = TopicHierarchy::new();
        tree.add_topic("Phishing", None, ids(&["a1"]));
        tree.add_topic("Phishing", None, ids(&["a2"]));
        assert_eq!(tree.articles_under("Phishing"), ids(&["a1", "a2"]));
    }

    #[test]
    fn depth_first_in_child_order() {
        let mut tree = TopicHierarchy::new();
        tree.add_topic("Root", None, ids(&["r"]));
        tree.add_topic("First", Some("Root"), ids(&["f"]));
        tree.add_topic("Second", Some("Root"), ids(&["s"]));
        tree.add_topic("FirstChild", Some("First"), ids(&["fc"]));
        assert_eq!(tree.articles_under("Root"), ids(&["r", "f", "fc", "s"]));
    }

    #[test]
    fn unknown_parent_orphans_node() {
        let mut tree = TopicHierarchy::new();
        tree.add_topic("Root", None, Vec::new());
        tree.add_topic("Lost", Some("Nowhere"), ids(&["x"]));
        // node exists and is queryable directly, but not reachable from root
        assert_eq!(tree.articles_under("Lost"), ids(&["x"]));
        assert!(tree.articles_under("Root").is_empty());
        assert_eq!(tree.parent_of("Lost"), None);
    }

    #[test]
    fn unknown_label_yields_nothing() {
        let tree = TopicHierarchy::new();
        assert!(tree.articles_under("Anything").is_empty());
    }
}

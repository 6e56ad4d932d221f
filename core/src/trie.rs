use std::collections::HashMap;

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, u32>,
    terminal: bool,
}

/// Prefix tree over lowercase strings. Nodes live in a flat arena indexed by
/// u32, so traversal is iterative and never recurses.
#[derive(Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Trie {
    pub fn new() -> Self {
        // index 0 is the root
        Self { nodes: vec![TrieNode::default()] }
    }

    /// Insert a word. Case-insensitive; shared prefixes share path segments.
    pub fn insert(&mut self, word: &str) {
        let mut cur = 0usize;
        for ch in word.to_lowercase().chars() {
            cur = match self.nodes[cur].children.get(&ch) {
                Some(&next) => next as usize,
                None => {
                    let next = self.nodes.len() as u32;
                    self.nodes.push(TrieNode::default());
                    self.nodes[cur].children.insert(ch, next);
                    next as usize
                }
            };
        }
        self.nodes[cur].terminal = true;
    }

    fn walk(&self, s: &str) -> Option<usize> {
        let mut cur = 0usize;
        for ch in s.chars() {
            cur = *self.nodes[cur].children.get(&ch)? as usize;
        }
        Some(cur)
    }

    /// Exact membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.walk(&word.to_lowercase())
            .map_or(false, |i| self.nodes[i].terminal)
    }

    /// True if any stored word starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.walk(&prefix.to_lowercase()).is_some()
    }

    /// All stored words, in no particular order.
    pub fn collect_all_words(&self) -> Vec<String> {
        let mut words = Vec::new();
        let mut stack: Vec<(usize, String)> = vec![(0, String::new())];
        while let Some((idx, prefix)) = stack.pop() {
            let node = &self.nodes[idx];
            if node.terminal {
                words.push(prefix.clone());
            }
            for (&ch, &child) in &node.children {
                let mut next = prefix.clone();
                next.push(ch);
                stack.push((child as usize, next));
            }
        }
        words
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_and_prefix() {
        let mut trie = Trie::new();
        trie.insert("malware");
        assert!(trie.contains("malware"));
        assert!(!trie.contains("malwar"));
        assert!(trie.has_prefix("mal"));
        assert!(!trie.has_prefix("ran"));
    }

    #[test]
    fn case_insensitive() {
        let mut trie = Trie::new();
        trie.insert("Phishing");
        assert!(trie.contains("phishing"));
        assert!(trie.contains("PHISHING"));
        assert!(trie.has_prefix("Phi"));
    }

    #[test]
    fn collects_all_words() {
        let mut trie = Trie::new();
        for w in ["ransom", "ransomware", "rootkit"] {
            trie.insert(w);
        }
        // reinsert must not create a second path
        trie.insert("ransom");
        let mut words = trie.collect_all_words();
        words.sort();
        assert_eq!(words, vec!["ransom", "ransomware", "rootkit"]);
    }

    #[test]
    fn empty_trie_yields_nothing() {
        let trie = Trie::new();
        assert!(!trie.contains("anything"));
        assert!(trie.collect_all_words().is_empty());
        // the empty prefix trivially matches the root
        assert!(trie.has_prefix(""));
    }
}

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::trie::Trie;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"[a-z]+").expect("valid regex");
}

// Closed list of function words, plus "attack"/"attacks" to keep queries
// focused on the threat/technique nouns around them.
const STOP_WORDS: &[&str] = &[
    "what", "is", "a", "an", "the", "how", "does", "do", "are", "can",
    "i", "you", "we", "they", "this", "that", "these", "those", "in",
    "on", "at", "to", "for", "of", "with", "from", "by", "about",
    "into", "through", "during", "including", "against", "among",
    "throughout", "despite", "towards", "upon", "concerning", "up",
    "attack", "attacks",
];

/// Tokenize text into lowercase alphabetic tokens: NFKC normalization,
/// lowercase, then maximal runs of a-z. Digits and punctuation are discarded.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    TOKEN_RE
        .find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Turns raw query text into significant terms, using a trie as the
/// stop-word oracle.
#[derive(Debug)]
pub struct QueryProcessor {
    stop_words: Trie,
}

impl QueryProcessor {
    pub fn new() -> Self {
        let mut stop_words = Trie::new();
        for word in STOP_WORDS {
            stop_words.insert(word);
        }
        Self { stop_words }
    }

    /// Tokenize, drop tokens of length <= 2, drop stop words. Token order is
    /// preserved; empty input yields an empty sequence.
    pub fn process_query(&self, query: &str) -> Vec<String> {
        tokenize(query)
            .into_iter()
            .filter(|t| t.len() > 2)
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }
}

impl Default for QueryProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_stop_words_and_short_tokens() {
        let qp = QueryProcessor::new();
        assert_eq!(qp.process_query("what is a ddos attack"), vec!["ddos"]);
    }

    #[test]
    fn attack_variants_are_stop_words() {
        let qp = QueryProcessor::new();
        assert_eq!(
            qp.process_query("ransomware attacks against hospitals"),
            vec!["ransomware", "hospitals"]
        );
    }

    #[test]
    fn preserves_order() {
        let qp = QueryProcessor::new();
        assert_eq!(
            qp.process_query("zero trust network segmentation"),
            vec!["zero", "trust", "network", "segmentation"]
        );
    }

    #[test]
    fn tokenize_discards_digits_and_punctuation() {
        assert_eq!(tokenize("CVE-2024-3094: xz/liblzma backdoor!"), vec!["cve", "xz", "liblzma", "backdoor"]);
        assert!(tokenize("12345 !!!").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn empty_query_is_not_an_error() {
        let qp = QueryProcessor::new();
        assert!(qp.process_query("").is_empty());
        assert!(qp.process_query("is a an of").is_empty());
    }
}

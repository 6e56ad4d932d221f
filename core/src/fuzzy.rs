//! Levenshtein edit distance and fuzzy vocabulary matching.

/// Default maximum edit distance accepted when substituting a query term with
/// a vocabulary term.
pub const DEFAULT_THRESHOLD: usize = 2;

/// Minimum number of single-character insertions, deletions and substitutions
/// transforming `a` into `b`. Two-row dynamic programming; operands are
/// swapped so the shorter string bounds the working row.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (longer, shorter) = if a.len() < b.len() { (b, a) } else { (a, b) };
    if shorter.is_empty() {
        return longer.len();
    }

    let mut prev: Vec<usize> = (0..=shorter.len()).collect();
    let mut cur = vec![0usize; shorter.len() + 1];
    for (i, &c1) in longer.iter().enumerate() {
        cur[0] = i + 1;
        for (j, &c2) in shorter.iter().enumerate() {
            let insertions = prev[j + 1] + 1;
            let deletions = cur[j] + 1;
            let substitutions = prev[j] + usize::from(c1 != c2);
            cur[j + 1] = insertions.min(deletions).min(substitutions);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[shorter.len()]
}

/// Accepts a query term as a match for a known vocabulary term when their
/// edit distance is within a fixed threshold.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    threshold: usize,
}

impl FuzzyMatcher {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Closest vocabulary term within the threshold. Ties are broken by
    /// smaller distance, then lexical order, so the result does not depend on
    /// candidate iteration order.
    pub fn best_match<'a, I>(&self, term: &str, vocabulary: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<(usize, &str)> = None;
        for word in vocabulary {
            let d = distance(term, word);
            if d > self.threshold {
                continue;
            }
            best = match best {
                Some((bd, bw)) if (bd, bw) <= (d, word) => Some((bd, bw)),
                _ => Some((d, word)),
            };
        }
        best.map(|(_, w)| w)
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

/// Near-duplicate check for article titles: distance within a quarter of the
/// shorter title. Whether to merge or drop such articles is an ingestion
/// policy decision, not enforced here.
pub fn titles_near_duplicate(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let shorter = a.chars().count().min(b.chars().count());
    distance(&a, &b) <= shorter / 4
}

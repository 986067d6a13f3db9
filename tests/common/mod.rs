//! Shared helpers for the integration suites.

use fuzzdex::{Index, IndexBuilder, Keyword};

/// Reference Levenshtein distance (full DP), used to cross-check the filter.
pub fn levenshtein(a: &[u8], b: &[u8]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let sub = prev[j] + usize::from(ca != cb);
            curr[j + 1] = sub.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

pub fn build_index(words: &[&[u8]]) -> Index {
    let mut builder = IndexBuilder::new();
    for w in words {
        builder.insert(Keyword::parse(w).unwrap()).unwrap();
    }
    builder.finalize()
}

//! End-to-end search scenarios
//!
//! Small hand-built databases exercising both candidate-enumeration phases
//! and the boundary behaviors around malformed queries.

mod common;

use common::{build_index, levenshtein};

#[test]
fn test_exact_match() {
    let index = build_index(&[b"ABCDEFGHIJABCDE"]);
    let mut searcher = index.searcher();
    assert!(searcher.search(b"ABCDEFGHIJABCDE", 0));
}

#[test]
fn test_two_substitutions_within_three() {
    let index = build_index(&[b"AAAAAAAAAAAAAAA"]);
    let mut searcher = index.searcher();
    assert!(searcher.search(b"AAAAAAAAAAAAABB", 3));
}

#[test]
fn test_three_substitutions_within_three() {
    let index = build_index(&[b"AAAAAAAAAAAAAAA"]);
    let mut searcher = index.searcher();
    assert!(searcher.search(b"AAAAAAAAAAAABBB", 3));
}

#[test]
fn test_four_substitutions_exceed_three() {
    let index = build_index(&[b"AAAAAAAAAAAAAAA"]);
    let mut searcher = index.searcher();
    assert_eq!(levenshtein(b"AAAAAAAAAAAAAAA", b"AAAAAAAAAAABBBB"), 4);
    assert!(!searcher.search(b"AAAAAAAAAAABBBB", 3));
}

#[test]
fn test_rotation_is_one_indel_pair() {
    // drop the leading A, append an F: distance 2, only reachable through
    // the deletion index
    let index = build_index(&[b"BCDEFGHIJABCDEF"]);
    let mut searcher = index.searcher();
    assert_eq!(levenshtein(b"ABCDEFGHIJABCDE", b"BCDEFGHIJABCDEF"), 2);
    assert!(searcher.search(b"ABCDEFGHIJABCDE", 3));
}

#[test]
fn test_two_substitutions_at_k_two_with_decoy() {
    let index = build_index(&[b"ABCDEFGHIJABCDE", b"JJJJJJJJJJJJJJJ"]);
    let mut searcher = index.searcher();
    assert!(searcher.search(b"ABCDEFGHIJABCJJ", 2));
}

#[test]
fn test_empty_index_never_matches() {
    let index = build_index(&[]);
    let mut searcher = index.searcher();
    for k in 0..=3 {
        assert!(!searcher.search(b"ABCDEFGHIJABCDE", k));
    }
}

#[test]
fn test_single_keyword_exact_at_k_zero() {
    let index = build_index(&[b"FEDCBAJIHGFEDCB"]);
    let mut searcher = index.searcher();
    assert!(searcher.search(b"FEDCBAJIHGFEDCB", 0));
    assert!(!searcher.search(b"FEDCBAJIHGFEDCA", 0));
}

#[test]
fn test_wrong_length_query_answers_zero() {
    let index = build_index(&[b"ABCDEFGHIJABCDE"]);
    let mut searcher = index.searcher();
    assert!(!searcher.search(b"ABCDEFGHIJABCD", 3));
    assert!(!searcher.search(b"ABCDEFGHIJABCDEA", 3));
    assert!(!searcher.search(b"", 3));
}

#[test]
fn test_out_of_alphabet_query_answers_zero() {
    let index = build_index(&[b"ABCDEFGHIJABCDE"]);
    let mut searcher = index.searcher();
    assert!(!searcher.search(b"KBCDEFGHIJABCDE", 3));
    assert!(!searcher.search(b"abcdefghijabcde", 3));
}

#[test]
fn test_repeated_searches_agree() {
    let index = build_index(&[b"ABCDEFGHIJABCDE", b"BCDEFGHIJABCDEF"]);
    let mut searcher = index.searcher();
    let first: Vec<bool> = (0..=3)
        .map(|k| searcher.search(b"ABCDEFGHIJABCDE", k))
        .collect();
    for _ in 0..100 {
        let again: Vec<bool> = (0..=3)
            .map(|k| searcher.search(b"ABCDEFGHIJABCDE", k))
            .collect();
        assert_eq!(first, again);
    }
}

#[test]
fn test_soundness_on_small_database() {
    // every positive answer must be witnessed by a real keyword
    let words: [&[u8]; 4] = [
        b"ABCDEFGHIJABCDE",
        b"AAAAABBBBBCCCCC",
        b"JJJJJIIIIIHHHHH",
        b"ABABABABABABABA",
    ];
    let index = build_index(&words);
    let mut searcher = index.searcher();
    let queries: [&[u8]; 5] = [
        b"ABCDEFGHIJABCDJ",
        b"AAAAABBBBBCCCCJ",
        b"HHHHHIIIIIJJJJJ",
        b"BABABABABABABAB",
        b"CCCCCBBBBBAAAAA",
    ];
    for q in queries {
        for k in 0..=3u32 {
            if searcher.search(q, k) {
                let witnessed = words.iter().any(|w| levenshtein(q, w) <= k as usize);
                assert!(witnessed, "false positive for {:?} k={k}", std::str::from_utf8(q));
            }
        }
    }
}

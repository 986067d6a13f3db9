//! Structural invariants of the finalized posting tables
//!
//! Every keyword must appear exactly once under each of its ten pair
//! subkeys, and exactly twice (left and right half) under each of its
//! fifteen deletions; posting lists must be ordered. The query engine's
//! completeness argument leans on all of these.

mod common;

use common::build_index;
use fuzzdex::codec::{delete_char, pack_key7, pair_key, PAIR_COUNT};
use fuzzdex::pair_index::PairIndex;
use fuzzdex::KEYWORD_LEN;

const WORDS: [&[u8]; 6] = [
    b"ABCDEFGHIJABCDE",
    b"JIHGFEDCBAJIHGF",
    b"AAAAAAAAAAAAAAA",
    b"ABCDEFGHIJABCDE", // duplicate keyword, distinct id
    b"BCDEFGHIJABCDEF",
    b"AABBCCDDEEFFGGH",
];

#[test]
fn test_posting_totals() {
    let index = build_index(&WORDS);
    let n = WORDS.len();
    assert_eq!(index.pair_index().total_postings(), 10 * n);
    assert_eq!(index.deletion_index().total_postings(), 30 * n);

    let pair_sum: u64 = index.pair_index().counts().iter().map(|&c| c as u64).sum();
    let del_sum: u64 = index
        .deletion_index()
        .counts()
        .iter()
        .map(|&c| c as u64)
        .sum();
    assert_eq!(pair_sum, 10 * n as u64);
    assert_eq!(del_sum, 30 * n as u64);
}

#[test]
fn test_every_pair_posting_appears_exactly_once() {
    let index = build_index(&WORDS);
    for (id, word) in WORDS.iter().enumerate() {
        let word: &[u8; KEYWORD_LEN] = (*word).try_into().unwrap();
        for p in 0..PAIR_COUNT {
            let slot = PairIndex::slot(p, &pair_key(word, p));
            let occurrences = index
                .pair_index()
                .postings(slot)
                .iter()
                .filter(|&&x| x == id as u32)
                .count();
            assert_eq!(occurrences, 1, "keyword {id} pair {p}");
        }
    }
}

#[test]
fn test_every_deletion_posting_appears_exactly_once_per_half() {
    let index = build_index(&WORDS);
    for (id, word) in WORDS.iter().enumerate() {
        let word: &[u8; KEYWORD_LEN] = (*word).try_into().unwrap();
        for pos in 0..KEYWORD_LEN {
            let del = delete_char(word, pos);
            let (left, right) = del.split_at(7);
            for half in [left, right] {
                let occurrences = index
                    .deletion_index()
                    .postings(pack_key7(half) as usize)
                    .iter()
                    .filter(|e| {
                        e.keyword_id().as_usize() == id && e.del_pos() as usize == pos
                    })
                    .count();
                // the all-As word folds both halves onto the same slot, so
                // count within that one slot doubles
                let expected = if left == right && half == left { 2 } else { 1 };
                assert_eq!(occurrences, expected, "keyword {id} pos {pos}");
            }
        }
    }
}

#[test]
fn test_pair_posting_lists_are_ascending() {
    let index = build_index(&WORDS);
    for (id, word) in WORDS.iter().enumerate() {
        let word: &[u8; KEYWORD_LEN] = (*word).try_into().unwrap();
        for p in 0..PAIR_COUNT {
            let slot = PairIndex::slot(p, &pair_key(word, p));
            let list = index.pair_index().postings(slot);
            assert!(
                list.windows(2).all(|w| w[0] < w[1]),
                "slot for keyword {id} pair {p} is not strictly ascending: {list:?}"
            );
        }
    }
}

#[test]
fn test_deletion_posting_lists_are_ordered() {
    let index = build_index(&WORDS);
    for (id, word) in WORDS.iter().enumerate() {
        let word: &[u8; KEYWORD_LEN] = (*word).try_into().unwrap();
        for pos in 0..KEYWORD_LEN {
            let del = delete_char(word, pos);
            let (left, _) = del.split_at(7);
            let list = index.deletion_index().postings(pack_key7(left) as usize);
            let keys: Vec<(u32, u8)> = list
                .iter()
                .map(|e| (e.keyword_id().as_u32(), e.del_pos()))
                .collect();
            assert!(
                keys.windows(2).all(|w| w[0] <= w[1]),
                "keyword {id} pos {pos}: {keys:?}"
            );
        }
    }
}

#[test]
fn test_empty_database_has_empty_tables() {
    let index = build_index(&[]);
    assert!(index.is_empty());
    assert_eq!(index.pair_index().total_postings(), 0);
    assert_eq!(index.deletion_index().total_postings(), 0);
}

//! Query engine
//!
//! Decides whether any keyword lies within edit distance k (k ≤ 3) of a
//! query. Equal lengths force every alignment to pair insertions with
//! deletions, which splits the problem into two exhaustive cases:
//!
//! - **Phase A** (no indel): edit distance equals Hamming distance. At most
//!   3 mismatches touch at most 3 of the 5 blocks, so two blocks match
//!   exactly and the pair index enumerates every candidate.
//! - **Phase B** (one indel): edit distance is 2 plus the Hamming distance
//!   between the two 14-char one-deletion strings, which must be ≤ 1, so one
//!   7-char half matches exactly and the deletion index enumerates every
//!   candidate across all 15 deletions of the query.
//!
//! Two or more indels cost ≥ 4 and cannot beat k = 3.

use crate::bits::{hamming14, hamming15};
use crate::codec::{delete_char, delete_nibble, pack_key7, pack_word, pair_key, PAIR_COUNT};
use crate::domain::{Keyword, KEYWORD_LEN};
use crate::index::Index;
use crate::pair_index::PairIndex;

/// A query handle over a finalized [`Index`].
///
/// Owns the visited buffer and its generation stamp, so concurrent callers
/// (or callers holding several indexes) get independent state by constructing
/// independent searchers. The buffer is sized to the index once, at
/// construction.
pub struct Searcher<'a> {
    index: &'a Index,
    visited: Vec<u32>,
    generation: u32,
}

impl<'a> Searcher<'a> {
    pub fn new(index: &'a Index) -> Self {
        Searcher {
            index,
            visited: vec![0; index.len()],
            generation: 0,
        }
    }

    /// Does any keyword lie within edit distance `k` of `query`?
    ///
    /// A query that is not exactly 15 characters of A..J answers `false`
    /// without touching the index. Candidate enumeration is complete for
    /// k ≤ 3 (the only values the drivers pass); larger k never produces a
    /// false positive, only possible misses.
    pub fn search(&mut self, query: &[u8], k: u32) -> bool {
        let Some(query) = Keyword::parse(query) else {
            return false;
        };
        self.search_keyword(&query, k)
    }

    fn search_keyword(&mut self, query: &Keyword, k: u32) -> bool {
        let word = query.as_bytes();
        let qcode = pack_word(word);
        let index = self.index;

        // ---- Phase A: substitution-only candidates via the pair index ----

        self.advance_generation();
        let gen = self.generation;

        let mut lists: [&[u32]; PAIR_COUNT] = [&[]; PAIR_COUNT];
        for (p, list) in lists.iter_mut().enumerate() {
            *list = index
                .pair_index()
                .postings(PairIndex::slot(p, &pair_key(word, p)));
        }

        // Shortest lists first: tighter candidates, earlier exits on positive
        // queries. Tie-break on pair id keeps the scan order deterministic.
        let mut order: [usize; PAIR_COUNT] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        order.sort_unstable_by_key(|&p| (lists[p].len(), p));

        for &p in &order {
            for &id in lists[p] {
                let stamp = &mut self.visited[id as usize];
                if *stamp == gen {
                    continue;
                }
                // The Phase-A distance does not depend on which pair surfaced
                // the id, so one evaluation settles it for good.
                *stamp = gen;
                if hamming15(qcode, index.code(id.into())) <= k {
                    return true;
                }
            }
        }

        // ---- Phase B: one-indel candidates via the deletion index ----

        self.advance_generation();
        let gen = self.generation;

        for pos in 0..KEYWORD_LEN {
            let qdel_code = delete_nibble(qcode, pos);
            let qdel = delete_char(word, pos);
            let (left, right) = qdel.split_at(7);

            for slot in [pack_key7(left) as usize, pack_key7(right) as usize] {
                for payload in index.deletion_index().postings(slot) {
                    let id = payload.keyword_id();
                    if self.visited[id.as_usize()] == gen {
                        continue;
                    }
                    let kw_del_code =
                        delete_nibble(index.code(id), payload.del_pos() as usize);
                    if 2 + hamming14(qdel_code, kw_del_code) <= k {
                        self.visited[id.as_usize()] = gen;
                        return true;
                    }
                    // A miss is NOT stamped: the same keyword can still match
                    // under a different (query, keyword) deletion pairing.
                }
            }
        }

        false
    }

    /// O(1) clear of the visited set. A slot counts as visited only when its
    /// stamp equals the current generation; on wrap-around the buffer is
    /// zeroed once and stamps restart at 1.
    fn advance_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.visited.fill(0);
            self.generation = 1;
        }
    }
}

//! Pair index: posting lists for the substitution-only case
//!
//! A keyword's 15 characters split into five 3-char blocks; at most 3
//! substitutions can touch at most 3 blocks, so any match within Hamming
//! distance 3 shares at least one of the ten block-pair 6-subkeys with the
//! query exactly. This table stores, for every (pair id, 6-subkey) slot, the
//! ids of all keywords carrying that subkey.
//!
//! Layout is compressed sparse row over a direct-address slot space: the
//! decimal subkey packing is dense and collision-free, so there is no hash
//! table and no chaining; slot lookup is one add and two array reads.

use crate::codec::{pack_key6, pair_key, PAIR_COUNT};
use crate::csr::exclusive_prefix_sum;
use crate::domain::Keyword;
use log::debug;

/// Slots per pair: one per possible 6-subkey.
pub const H_KEY_SPACE: usize = 1_000_000;

/// Total slots across all ten pairs.
pub const PAIR_SLOTS: usize = H_KEY_SPACE * PAIR_COUNT;

/// CSR posting table keyed by (pair id, 6-subkey).
///
/// `counts` is kept alongside `offsets` because the on-disk form stores
/// counts (width-adapted), not offsets.
pub struct PairIndex {
    counts: Vec<u32>,
    offsets: Vec<u32>,
    ids: Vec<u32>,
}

impl PairIndex {
    /// Slot address for pair `p` and the given 6-byte subkey.
    #[inline]
    pub fn slot(p: usize, key: &[u8]) -> usize {
        pack_key6(key) as usize + p * H_KEY_SPACE
    }

    /// Two-pass CSR construction: count every posting, prefix-sum into
    /// offsets, then fill through a transient cursor copy. Walking keyword
    /// ids in ascending order makes every posting list ascending, which the
    /// query path and the serialized form both rely on.
    pub fn build(keywords: &[Keyword]) -> Self {
        let mut counts = vec![0u32; PAIR_SLOTS];
        for kw in keywords {
            for p in 0..PAIR_COUNT {
                counts[Self::slot(p, &pair_key(kw.as_bytes(), p))] += 1;
            }
        }

        let offsets = exclusive_prefix_sum(&counts);
        let total = offsets[PAIR_SLOTS] as usize;
        let mut ids = vec![0u32; total];

        let mut cursor: Vec<u32> = offsets[..PAIR_SLOTS].to_vec();
        for (id, kw) in keywords.iter().enumerate() {
            for p in 0..PAIR_COUNT {
                let slot = Self::slot(p, &pair_key(kw.as_bytes(), p));
                ids[cursor[slot] as usize] = id as u32;
                cursor[slot] += 1;
            }
        }

        debug!(
            "pair index built: {} keywords, {} postings",
            keywords.len(),
            total
        );
        PairIndex {
            counts,
            offsets,
            ids,
        }
    }

    /// Reassemble from deserialized parts. `offsets` must be the exclusive
    /// prefix sum of `counts` and `ids.len()` its total; the loader checks
    /// both before calling.
    pub(crate) fn from_raw_parts(counts: Vec<u32>, offsets: Vec<u32>, ids: Vec<u32>) -> Self {
        debug_assert_eq!(counts.len(), PAIR_SLOTS);
        debug_assert_eq!(offsets.len(), PAIR_SLOTS + 1);
        debug_assert_eq!(ids.len(), offsets[PAIR_SLOTS] as usize);
        PairIndex {
            counts,
            offsets,
            ids,
        }
    }

    /// The posting list stored at `slot`, in ascending keyword-id order.
    #[inline]
    pub fn postings(&self, slot: usize) -> &[u32] {
        let start = self.offsets[slot] as usize;
        let end = self.offsets[slot + 1] as usize;
        &self.ids[start..end]
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total_postings(&self) -> usize {
        self.offsets[PAIR_SLOTS] as usize
    }
}

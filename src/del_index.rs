//! Deletion index: posting lists for the one-indel case
//!
//! Deleting one character from a keyword leaves a 14-char string. With at most
//! one substitution allowed on top of the indel pair, at least one 7-char half
//! of that string must match a half of the query's deletion exactly, so both
//! halves of every deletion of every keyword are indexed under their 7-subkey.
//! Left and right halves share one table: the key space is the same 10^7
//! either way, and each posting carries the deletion position it came from so
//! the query side can reconstruct the matching 14-char code.

use crate::codec::{delete_char, pack_key7};
use crate::csr::exclusive_prefix_sum;
use crate::domain::{DelPayload, Keyword, KeywordId, KEYWORD_LEN};
use log::debug;

/// One slot per possible 7-subkey.
pub const DEL_KEY_SPACE: usize = 10_000_000;

/// Postings contributed by one keyword: 15 deletion positions, two halves.
pub const POSTINGS_PER_KEYWORD: usize = 2 * KEYWORD_LEN;

/// CSR posting table keyed by 7-subkey, payloads packed (del_pos, id).
pub struct DeletionIndex {
    counts: Vec<u32>,
    offsets: Vec<u32>,
    payload: Vec<DelPayload>,
}

impl DeletionIndex {
    /// Two-pass CSR construction, same shape as the pair index. For each
    /// keyword id (ascending) and each deletion position 0..15 (ascending),
    /// the left-half posting lands before the right-half posting, so within
    /// any slot payloads are ordered by id, then by deletion position.
    pub fn build(keywords: &[Keyword]) -> Self {
        let mut counts = vec![0u32; DEL_KEY_SPACE];
        for kw in keywords {
            for pos in 0..KEYWORD_LEN {
                let del = delete_char(kw.as_bytes(), pos);
                let (left, right) = del.split_at(7);
                counts[pack_key7(left) as usize] += 1;
                counts[pack_key7(right) as usize] += 1;
            }
        }

        let offsets = exclusive_prefix_sum(&counts);
        let total = offsets[DEL_KEY_SPACE] as usize;
        let mut payload = vec![DelPayload::from_raw(0); total];

        let mut cursor: Vec<u32> = offsets[..DEL_KEY_SPACE].to_vec();
        for (id, kw) in keywords.iter().enumerate() {
            for pos in 0..KEYWORD_LEN {
                let del = delete_char(kw.as_bytes(), pos);
                let (left, right) = del.split_at(7);
                let entry = DelPayload::new(KeywordId::new(id as u32), pos as u8);
                for slot in [pack_key7(left) as usize, pack_key7(right) as usize] {
                    payload[cursor[slot] as usize] = entry;
                    cursor[slot] += 1;
                }
            }
        }

        debug!(
            "deletion index built: {} keywords, {} postings",
            keywords.len(),
            total
        );
        DeletionIndex {
            counts,
            offsets,
            payload,
        }
    }

    /// Reassemble from deserialized parts; invariants checked by the loader.
    pub(crate) fn from_raw_parts(
        counts: Vec<u32>,
        offsets: Vec<u32>,
        payload: Vec<DelPayload>,
    ) -> Self {
        debug_assert_eq!(counts.len(), DEL_KEY_SPACE);
        debug_assert_eq!(offsets.len(), DEL_KEY_SPACE + 1);
        debug_assert_eq!(payload.len(), offsets[DEL_KEY_SPACE] as usize);
        DeletionIndex {
            counts,
            offsets,
            payload,
        }
    }

    /// The posting list for a 7-subkey slot.
    #[inline]
    pub fn postings(&self, slot: usize) -> &[DelPayload] {
        let start = self.offsets[slot] as usize;
        let end = self.offsets[slot + 1] as usize;
        &self.payload[start..end]
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total_postings(&self) -> usize {
        self.offsets[DEL_KEY_SPACE] as usize
    }
}

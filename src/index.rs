//! Finalized, searchable index
//!
//! Owns the keyword table, the nibble-code table, and both posting tables.
//! Instances come from [`IndexBuilder::finalize`](crate::IndexBuilder) or
//! from [`read_index`](crate::read_index); both produce the same observable
//! state (the code table is recomputed on load rather than persisted).

use crate::del_index::DeletionIndex;
use crate::domain::{Keyword, KeywordId};
use crate::pair_index::PairIndex;
use crate::search::Searcher;

pub struct Index {
    keywords: Vec<Keyword>,
    codes: Vec<u64>,
    pairs: PairIndex,
    deletions: DeletionIndex,
}

impl Index {
    pub(crate) fn from_parts(
        keywords: Vec<Keyword>,
        codes: Vec<u64>,
        pairs: PairIndex,
        deletions: DeletionIndex,
    ) -> Self {
        debug_assert_eq!(keywords.len(), codes.len());
        Index {
            keywords,
            codes,
            pairs,
            deletions,
        }
    }

    /// Number of keywords in the database.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn keyword(&self, id: KeywordId) -> &Keyword {
        &self.keywords[id.as_usize()]
    }

    /// The nibble code of keyword `id`.
    #[inline]
    pub fn code(&self, id: KeywordId) -> u64 {
        self.codes[id.as_usize()]
    }

    pub fn pair_index(&self) -> &PairIndex {
        &self.pairs
    }

    pub fn deletion_index(&self) -> &DeletionIndex {
        &self.deletions
    }

    /// A query handle with its own visited state. Create one per caller;
    /// searchers are cheap relative to the index and never share stamps.
    pub fn searcher(&self) -> Searcher<'_> {
        Searcher::new(self)
    }
}

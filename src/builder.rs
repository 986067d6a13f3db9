//! Mutable phase of the index lifecycle
//!
//! `IndexBuilder` accepts keywords; `finalize()` consumes it and produces the
//! immutable, searchable [`Index`]. The one-way transition is enforced by
//! move semantics: there is no way to insert into a finalized index or to
//! search an unfinalized one.

use crate::codec::pack_word;
use crate::del_index::DeletionIndex;
use crate::domain::{Keyword, KeywordId, MAX_KEYWORDS};
use crate::index::Index;
use crate::pair_index::PairIndex;
use log::debug;
use thiserror::Error;

/// Errors that can occur while inserting keywords
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// The 20-bit id space is full
    #[error("keyword capacity exhausted (2^20 - 1 entries)")]
    CapacityExhausted,
}

/// Appendable keyword store: raw keywords plus their nibble codes.
///
/// The code table is a pure denormalization of the keyword table, maintained
/// eagerly so finalization and search never re-pack.
pub struct IndexBuilder {
    keywords: Vec<Keyword>,
    codes: Vec<u64>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1024);
        IndexBuilder {
            keywords: Vec::with_capacity(capacity),
            codes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Append a keyword, returning its id (assigned in insertion order).
    pub fn insert(&mut self, keyword: Keyword) -> Result<KeywordId, InsertError> {
        if self.keywords.len() >= MAX_KEYWORDS {
            return Err(InsertError::CapacityExhausted);
        }
        let id = KeywordId::new(self.keywords.len() as u32);
        self.codes.push(pack_word(keyword.as_bytes()));
        self.keywords.push(keyword);
        Ok(id)
    }

    /// Build both posting tables and seal the index.
    pub fn finalize(self) -> Index {
        debug!("finalizing index over {} keywords", self.keywords.len());
        let pairs = PairIndex::build(&self.keywords);
        let deletions = DeletionIndex::build(&self.keywords);
        Index::from_parts(self.keywords, self.codes, pairs, deletions)
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

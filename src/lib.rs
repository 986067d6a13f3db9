//! fuzzdex - approximate-membership filter for fixed-length keywords
//!
//! Answers "does the database contain any keyword within edit distance k
//! (k ≤ 3) of this query?" with one boolean per query, at sub-microsecond
//! latency after a one-time index build. Keywords and queries are exactly 15
//! characters over the alphabet A..J.
//!
//! ## How it works
//!
//! Because both strings have the same length, every edit script pairs each
//! insertion with a deletion, so for k ≤ 3 only two cases exist: pure
//! substitutions (edit distance = Hamming distance) and exactly one
//! insertion/deletion pair (edit distance = 2 + Hamming distance of the
//! 14-char deletions). Each case gets its own inverted index whose exact
//! subkey lookups are guaranteed, by pigeonhole, to surface every candidate:
//!
//! - a **pair index** over the ten 2-combinations of the five 3-char blocks,
//! - a **deletion index** over both 7-char halves of all 15 one-char
//!   deletions of every keyword.
//!
//! Candidate verification is bit-parallel: words are packed 4 bits per
//! character into a `u64`, and a Hamming distance is one XOR, two OR-folds,
//! a mask, and a popcount.
//!
//! ## Usage
//!
//! ```rust
//! use fuzzdex::{IndexBuilder, Keyword};
//!
//! let mut builder = IndexBuilder::new();
//! builder.insert(Keyword::parse(b"ABCDEFGHIJABCDE").unwrap()).unwrap();
//! let index = builder.finalize();
//!
//! let mut searcher = index.searcher();
//! assert!(searcher.search(b"ABCDEFGHIJABCDE", 0));
//! assert!(searcher.search(b"ABCDEFGHIJABCJJ", 2));
//! assert!(!searcher.search(b"JJJJJJJJJJJJJJJ", 3));
//! ```

pub mod args;
pub mod bits;
pub mod builder;
pub mod codec;
mod csr;
pub mod del_index;
pub mod domain;
pub mod index;
pub mod pair_index;
pub mod search;
pub mod serialize;

pub use builder::{IndexBuilder, InsertError};
pub use domain::{DelPayload, Keyword, KeywordId, KEYWORD_LEN, MAX_KEYWORDS};
pub use index::Index;
pub use search::Searcher;
pub use serialize::{read_index, write_index, LoadError};

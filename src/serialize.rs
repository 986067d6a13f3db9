//! On-disk index format
//!
//! The byte layout is the cross-implementation contract: everything is
//! little-endian with no padding, in this order:
//!
//! 1. keyword count `N` (i32)
//! 2. keyword table, `N` × 16 bytes (15 chars + NUL)
//! 3. pair-index block: `key_space` (i32 = 1,000,000), `pair_count`
//!    (i32 = 10), `count_bits` (u8 ∈ {16, 32}), per-slot counts at that
//!    width, `total_ids` (i32), then ids as 3-byte values
//! 4. deletion-index block: `key_space` (i32 = 10,000,000), `count_bits`,
//!    counts, `total_ids` (i32), then packed payloads as 3-byte values
//!
//! Counts drop to 16 bits whenever the largest slot fits, and postings are
//! 3 bytes because ids are 20-bit and deletion payloads 24-bit by
//! construction. Offsets and nibble codes are never written; both are
//! recomputed on load. `total_ids` doubles as a structural checksum: the
//! loader recomputes the count sum and refuses the file on mismatch.

use crate::codec::pack_word;
use crate::csr::exclusive_prefix_sum;
use crate::del_index::{DeletionIndex, DEL_KEY_SPACE};
use crate::domain::{DelPayload, Keyword, KEYWORD_LEN, MAX_KEYWORDS};
use crate::index::Index;
use crate::pair_index::{PairIndex, H_KEY_SPACE, PAIR_SLOTS};
use binrw::{BinRead, BinReaderExt};
use log::debug;
use std::io::{self, Read, Seek, Write};
use thiserror::Error;

/// Errors that can occur while loading an index
#[derive(Debug, Error)]
pub enum LoadError {
    /// Short read or other stream failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed fixed-size header field
    #[error("malformed header: {0}")]
    Header(#[from] binrw::Error),

    /// Keyword count outside [0, 2^20 - 1]
    #[error("keyword count {0} out of range")]
    KeywordCount(i32),

    /// Keyword table entry is not 15 chars of A..J
    #[error("keyword {0} in table is malformed")]
    BadKeyword(usize),

    /// key_space field does not match the fixed slot geometry
    #[error("unexpected key space {found} (expected {expected})")]
    KeySpace { expected: i32, found: i32 },

    /// pair_count field does not match the fixed pair table
    #[error("unexpected pair count {0} (expected 10)")]
    PairCount(i32),

    /// count_bits is neither 16 nor 32
    #[error("unsupported count width {0}")]
    CountWidth(u8),

    /// Stored posting total disagrees with the sum of the counts
    #[error("posting total mismatch: header says {header}, counts sum to {computed}")]
    TotalMismatch { header: i32, computed: u64 },

    /// A posting references a keyword id outside [0, N)
    #[error("posting id {id} out of range for {count} keywords")]
    PostingOutOfRange { id: u32, count: u32 },

    /// A deletion payload carries a position outside [0, 14]
    #[error("deletion position {0} out of range")]
    DelPosOutOfRange(u8),
}

#[derive(Debug, BinRead)]
#[br(little)]
struct PairBlockHeader {
    key_space: i32,
    pair_count: i32,
    count_bits: u8,
}

#[derive(Debug, BinRead)]
#[br(little)]
struct DelBlockHeader {
    key_space: i32,
    count_bits: u8,
}

const H_KEY_SPACE_FIELD: i32 = H_KEY_SPACE as i32;
const DEL_KEY_SPACE_FIELD: i32 = DEL_KEY_SPACE as i32;
const PAIR_COUNT_FIELD: i32 = crate::codec::PAIR_COUNT as i32;

// ============================================================================
// Writing
// ============================================================================

/// Serialize a finalized index. The output is byte-identical across hosts;
/// `out` needs no seeking, so piping to stdout works.
pub fn write_index<W: Write>(index: &Index, out: &mut W) -> io::Result<()> {
    out.write_all(&(index.len() as i32).to_le_bytes())?;
    for kw in index.keywords() {
        out.write_all(kw.as_bytes())?;
        out.write_all(&[0])?;
    }

    // pair-index block
    out.write_all(&H_KEY_SPACE_FIELD.to_le_bytes())?;
    out.write_all(&PAIR_COUNT_FIELD.to_le_bytes())?;
    write_counts(index.pair_index().counts(), out)?;
    out.write_all(&(index.pair_index().total_postings() as i32).to_le_bytes())?;
    write_u24s(index.pair_index(), out)?;

    // deletion-index block
    out.write_all(&DEL_KEY_SPACE_FIELD.to_le_bytes())?;
    write_counts(index.deletion_index().counts(), out)?;
    out.write_all(&(index.deletion_index().total_postings() as i32).to_le_bytes())?;
    write_del_u24s(index.deletion_index(), out)?;

    Ok(())
}

/// Write `count_bits` and the counts at that width. The narrower encoding is
/// taken whenever the largest count fits in 16 bits.
fn write_counts<W: Write>(counts: &[u32], out: &mut W) -> io::Result<()> {
    let max = counts.iter().copied().max().unwrap_or(0);
    if max <= u16::MAX as u32 {
        out.write_all(&[16])?;
        let mut buf = Vec::with_capacity(counts.len() * 2);
        for &c in counts {
            buf.extend_from_slice(&(c as u16).to_le_bytes());
        }
        out.write_all(&buf)?;
    } else {
        out.write_all(&[32])?;
        let mut buf = Vec::with_capacity(counts.len() * 4);
        for &c in counts {
            buf.extend_from_slice(&c.to_le_bytes());
        }
        out.write_all(&buf)?;
    }
    // the conversion buffer dies here; only the stream keeps the bytes
    Ok(())
}

fn write_u24s<W: Write>(pairs: &PairIndex, out: &mut W) -> io::Result<()> {
    let mut buf = Vec::with_capacity(pairs.total_postings() * 3);
    for slot in 0..PAIR_SLOTS {
        for &id in pairs.postings(slot) {
            buf.extend_from_slice(&id.to_le_bytes()[..3]);
        }
    }
    out.write_all(&buf)
}

fn write_del_u24s<W: Write>(deletions: &DeletionIndex, out: &mut W) -> io::Result<()> {
    let mut buf = Vec::with_capacity(deletions.total_postings() * 3);
    for slot in 0..DEL_KEY_SPACE {
        for payload in deletions.postings(slot) {
            buf.extend_from_slice(&payload.raw().to_le_bytes()[..3]);
        }
    }
    out.write_all(&buf)
}

// ============================================================================
// Loading
// ============================================================================

/// Deserialize an index. Any structural problem (truncation, unknown count
/// width, header constants off, posting totals that do not match the counts,
/// out-of-range postings) fails the load; partially read state is dropped.
pub fn read_index<R: Read + Seek>(reader: &mut R) -> Result<Index, LoadError> {
    let n: i32 = reader.read_le()?;
    if n < 0 || n as usize > MAX_KEYWORDS {
        return Err(LoadError::KeywordCount(n));
    }
    let n = n as usize;

    let mut raw = vec![0u8; n * (KEYWORD_LEN + 1)];
    reader.read_exact(&mut raw)?;
    let mut keywords = Vec::with_capacity(n);
    for (i, record) in raw.chunks_exact(KEYWORD_LEN + 1).enumerate() {
        let kw = Keyword::parse(&record[..KEYWORD_LEN]).ok_or(LoadError::BadKeyword(i))?;
        keywords.push(kw);
    }
    drop(raw);

    // codes are never persisted; rebuild the table from the keywords
    let codes: Vec<u64> = keywords.iter().map(|kw| pack_word(kw.as_bytes())).collect();

    // pair-index block
    let header: PairBlockHeader = reader.read_le()?;
    if header.key_space != H_KEY_SPACE_FIELD {
        return Err(LoadError::KeySpace {
            expected: H_KEY_SPACE_FIELD,
            found: header.key_space,
        });
    }
    if header.pair_count != PAIR_COUNT_FIELD {
        return Err(LoadError::PairCount(header.pair_count));
    }
    let counts = read_counts(reader, PAIR_SLOTS, header.count_bits)?;
    let total = check_total(reader, &counts)?;
    let ids = read_u24s(reader, total)?;
    for &id in &ids {
        if id as usize >= n {
            return Err(LoadError::PostingOutOfRange {
                id,
                count: n as u32,
            });
        }
    }
    let offsets = exclusive_prefix_sum(&counts);
    let pairs = PairIndex::from_raw_parts(counts, offsets, ids);

    // deletion-index block
    let header: DelBlockHeader = reader.read_le()?;
    if header.key_space != DEL_KEY_SPACE_FIELD {
        return Err(LoadError::KeySpace {
            expected: DEL_KEY_SPACE_FIELD,
            found: header.key_space,
        });
    }
    let counts = read_counts(reader, DEL_KEY_SPACE, header.count_bits)?;
    let total = check_total(reader, &counts)?;
    let raw_payloads = read_u24s(reader, total)?;
    let mut payload = Vec::with_capacity(raw_payloads.len());
    for raw in raw_payloads {
        let entry = DelPayload::from_raw(raw);
        if entry.keyword_id().as_usize() >= n {
            return Err(LoadError::PostingOutOfRange {
                id: entry.keyword_id().as_u32(),
                count: n as u32,
            });
        }
        if entry.del_pos() as usize >= KEYWORD_LEN {
            return Err(LoadError::DelPosOutOfRange(entry.del_pos()));
        }
        payload.push(entry);
    }
    let offsets = exclusive_prefix_sum(&counts);
    let deletions = DeletionIndex::from_raw_parts(counts, offsets, payload);

    debug!(
        "index loaded: {} keywords, {} pair postings, {} deletion postings",
        n,
        pairs.total_postings(),
        deletions.total_postings()
    );
    Ok(Index::from_parts(keywords, codes, pairs, deletions))
}

/// Read a counts array at the stored width, widening to u32 in memory.
fn read_counts<R: Read>(reader: &mut R, len: usize, bits: u8) -> Result<Vec<u32>, LoadError> {
    match bits {
        16 => {
            let mut raw = vec![0u8; len * 2];
            reader.read_exact(&mut raw)?;
            Ok(raw
                .chunks_exact(2)
                .map(|b| u16::from_le_bytes([b[0], b[1]]) as u32)
                .collect())
        }
        32 => {
            let mut raw = vec![0u8; len * 4];
            reader.read_exact(&mut raw)?;
            Ok(raw
                .chunks_exact(4)
                .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect())
        }
        other => Err(LoadError::CountWidth(other)),
    }
}

/// Read the stored posting total and cross-check it against the counts.
/// The sum is taken in u64 so a corrupt counts array cannot wrap its way
/// past the check.
fn check_total<R: Read + Seek>(reader: &mut R, counts: &[u32]) -> Result<usize, LoadError> {
    let header: i32 = reader.read_le()?;
    let computed: u64 = counts.iter().map(|&c| c as u64).sum();
    if header < 0 || computed != header as u64 {
        return Err(LoadError::TotalMismatch { header, computed });
    }
    Ok(computed as usize)
}

fn read_u24s<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u32>, LoadError> {
    let mut raw = vec![0u8; len * 3];
    reader.read_exact(&mut raw)?;
    Ok(raw
        .chunks_exact(3)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], 0]))
        .collect())
}

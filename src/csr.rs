//! Shared layout helper for the two CSR posting tables.

/// Exclusive prefix sum of a counts array: `offsets[i]` is the start of slot
/// i's postings, `offsets[len]` the grand total.
pub(crate) fn exclusive_prefix_sum(counts: &[u32]) -> Vec<u32> {
    let mut offsets = Vec::with_capacity(counts.len() + 1);
    let mut running = 0u32;
    offsets.push(0);
    for &c in counts {
        running += c;
        offsets.push(running);
    }
    offsets
}

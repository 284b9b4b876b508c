//! In-memory permutation (C4): Fisher–Yates over a bucket's index, then a
//! sequential write of records in the new order.

use crate::bucket::MemoryBucket;
use crate::record::RecordWriter;
use crate::rng::DeterministicRng;
use anyhow::Result;

/// Shuffle `idx` in place drawing `j` from `[0, i)` (not the classical
/// inclusive `[0, i]`): element 0 is touched only via swaps from higher
/// positions. This is a deliberate deviation kept for bit-identical
/// reproducibility (see DESIGN.md).
pub fn fisher_yates(idx: &mut [crate::index::IndexEntry], rng: &mut DeterministicRng) {
    let m = idx.len();
    if m < 2 {
        return;
    }
    for i in (1..m).rev() {
        let j = rng.draw_index(i as u64) as usize;
        idx.swap(i, j);
    }
}

/// Permute `bucket`'s index with `rng`, then write each record in the new
/// order to `out_a`/`out_b`.
pub fn permute_and_append(
    bucket: &mut MemoryBucket,
    rng: &mut DeterministicRng,
    out_a: &mut RecordWriter,
    out_b: &mut RecordWriter,
) -> Result<()> {
    fisher_yates(&mut bucket.index, rng);
    for entry in &bucket.index {
        let a_start = entry.offset as usize;
        let a_end = a_start + entry.len_a as usize;
        let b_end = a_end + entry.len_b as usize;
        out_a.write_all(&bucket.buf[a_start..a_end])?;
        out_b.write_all(&bucket.buf[a_end..b_end])?;
    }
    Ok(())
}

//! Distribution pass (C5): routes each incoming record pair to a bucket
//! drawn uniformly from `[0, K+1)`. Bucket 0 is the in-memory bucket;
//! buckets `1..K` are spill buckets.

use crate::bucket::{MemoryBucket, SpillBucket};
use crate::rng::DeterministicRng;
use anyhow::Result;

/// Owns the in-memory bucket plus `K` spill buckets for one input pair's
/// distribution pass.
pub struct Distributor {
    pub memory: MemoryBucket,
    pub spills: Vec<SpillBucket>,
}

impl Distributor {
    pub fn new(dir: &std::path::Path, num_spill_buckets: usize) -> Result<Self> {
        let mut spills = Vec::with_capacity(num_spill_buckets);
        for bucket_id in 1..=num_spill_buckets {
            spills.push(SpillBucket::create(dir, bucket_id)?);
        }
        Ok(Self { memory: MemoryBucket::default(), spills })
    }

    /// Route one record pair to the bucket drawn from `rng.draw_index(K+1)`.
    pub fn route(&mut self, rng: &mut DeterministicRng, a: &[u8], b: &[u8]) -> Result<()> {
        let k_plus_one = (self.spills.len() + 1) as u64;
        let t = rng.draw_index(k_plus_one);
        if t == 0 {
            self.memory.append(a, b);
        } else {
            self.spills[(t - 1) as usize].append(a, b)?;
        }
        Ok(())
    }

    /// Flush all spill writers once the input has been fully distributed.
    pub fn finish_writing(&mut self) -> Result<()> {
        for s in &mut self.spills {
            s.finish_writing()?;
        }
        Ok(())
    }
}

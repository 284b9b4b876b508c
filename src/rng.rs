//! Deterministic, seeded random source (C1).
//!
//! Draws a stream of `u64`s from repeated SHA-256 hashing of a counter
//! chained to the previous digest, so that the whole stream is a pure
//! function of the initial seed. This is what makes full-crate reruns
//! bit-identical for a fixed seed, fixed input ordering, and fixed
//! configuration.

use sha2::{Digest, Sha256};
use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seeded SHA-256 counter stream yielding uniform `u64`s, and derived
/// `draw_f64`/`draw_index` helpers.
pub struct DeterministicRng {
    counter: u64,
    prev: Vec<u8>,
    waiting: VecDeque<u64>,
}

impl DeterministicRng {
    /// Seed fresh state. An empty seed falls back to the current wall-clock
    /// seconds (as its decimal ASCII representation).
    pub fn seed(seed: &str) -> (Self, String) {
        let effective = if seed.is_empty() {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            secs.to_string()
        } else {
            seed.to_string()
        };
        let rng = Self {
            counter: 0,
            prev: effective.as_bytes().to_vec(),
            waiting: VecDeque::new(),
        };
        (rng, effective)
    }

    /// The per-bucket salted seed used by the shuffle driver: `seed ‖ ascii(bucket_id)`.
    pub fn seed_for_bucket(seed: &str, bucket_id: i64) -> (Self, String) {
        let salted = format!("{seed}{bucket_id}");
        Self::seed(&salted)
    }

    fn refill(&mut self) {
        debug_assert!(self.waiting.is_empty());
        let mut hasher = Sha256::new();
        hasher.update(self.counter.to_string().as_bytes());
        hasher.update(&self.prev);
        let block = hasher.finalize();
        self.counter += 1;
        for chunk in block.chunks_exact(8) {
            self.waiting.push_back(u64::from_le_bytes(chunk.try_into().unwrap()));
        }
        self.prev = block.to_vec();
    }

    fn next_u64(&mut self) -> u64 {
        if self.waiting.is_empty() {
            self.refill();
        }
        self.waiting.pop_front().expect("refill always produces 8 values")
    }

    /// Draw a uniform `f64` in `[0, 1)`.
    pub fn draw_f64(&mut self) -> f64 {
        const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0; // 2^64
        let u = self.next_u64();
        (u as f64) / TWO_POW_64
    }

    /// Draw a uniform integer in `[0, n)`. `n == 0` always yields `0`.
    pub fn draw_index(&mut self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        ((n as f64) * self.draw_f64()).floor() as u64
    }
}

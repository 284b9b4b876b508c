//! User-facing configuration with builder chaining, following the
//! teacher's `ETLOptions` pattern.

use std::path::PathBuf;

/// `-t/--num-temp-files`: either caller-chosen auto sizing, or a fixed
/// bucket count that overrides `block_size_bytes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumTempFiles {
    Auto,
    Fixed(u64),
}

#[derive(Clone, Debug)]
pub struct ShuffleConfig {
    /// Ordered first-read input paths.
    pub reads: Vec<PathBuf>,
    /// Ordered second-read input paths, same length as `reads`.
    pub mates: Vec<PathBuf>,
    pub block_size_bytes: u64,
    pub num_temp_files: NumTempFiles,
    pub temp_dir: Option<PathBuf>,
    pub outdir: Option<PathBuf>,
    pub seed: String,
    pub read_buffer_bytes: usize,
    pub write_buffer_bytes: usize,
    pub progress: bool,
}

const DEFAULT_BLOCK_SIZE: u64 = 1024 * 1024 * 1024; // 1G

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            reads: Vec::new(),
            mates: Vec::new(),
            block_size_bytes: DEFAULT_BLOCK_SIZE,
            num_temp_files: NumTempFiles::Auto,
            temp_dir: None,
            outdir: None,
            seed: String::new(),
            read_buffer_bytes: 256 * 1024,
            write_buffer_bytes: 256 * 1024,
            progress: true,
        }
    }
}

impl ShuffleConfig {
    pub fn with_reads(mut self, reads: Vec<PathBuf>) -> Self {
        self.reads = reads;
        self
    }
    pub fn with_mates(mut self, mates: Vec<PathBuf>) -> Self {
        self.mates = mates;
        self
    }
    pub fn with_block_size_bytes(mut self, bytes: u64) -> Self {
        self.block_size_bytes = bytes.max(1);
        self
    }
    pub fn with_num_temp_files(mut self, n: NumTempFiles) -> Self {
        self.num_temp_files = n;
        self
    }
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }
    pub fn with_temp_dir_opt(mut self, dir: Option<PathBuf>) -> Self {
        self.temp_dir = dir;
        self
    }
    pub fn with_outdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.outdir = Some(dir.into());
        self
    }
    pub fn with_outdir_opt(mut self, dir: Option<PathBuf>) -> Self {
        self.outdir = dir;
        self
    }
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self {
        self.read_buffer_bytes = read_bytes.max(8 * 1024);
        self.write_buffer_bytes = write_bytes.max(8 * 1024);
        self
    }

    /// Effective block size after applying `num_temp_files` (if `Fixed`,
    /// it overrides `block_size_bytes` via `ceil(max_pair_bytes / n)`),
    /// and the resulting spill-bucket count `K` (0 means pure in-memory).
    ///
    /// `max_pair_bytes` is `max(size(reads[i]) + size(mates[i]))` across
    /// all configured pairs.
    pub fn resolve_bucket_count(&self, max_pair_bytes: u64) -> (u64, u64) {
        let effective_block_size = match self.num_temp_files {
            NumTempFiles::Auto => self.block_size_bytes,
            NumTempFiles::Fixed(n) if n > 0 => div_ceil(max_pair_bytes, n),
            NumTempFiles::Fixed(_) => self.block_size_bytes,
        };
        let effective_block_size = effective_block_size.max(1);

        let k = if effective_block_size >= max_pair_bytes {
            0
        } else {
            div_ceil(max_pair_bytes, effective_block_size).saturating_sub(1)
        };
        (effective_block_size, k)
    }
}

fn div_ceil(a: u64, b: u64) -> u64 {
    if b == 0 {
        return a;
    }
    (a + b - 1) / b
}

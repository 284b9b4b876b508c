//! Shuffle driver: orchestrates bucket-count selection, the distribution
//! pass, and the per-bucket reseed-permute-append pass for each
//! configured input pair.

use crate::config::ShuffleConfig;
use crate::distribute::Distributor;
use crate::permute::permute_and_append;
use crate::progress::ProgressScope;
use crate::record::{PairReader, RecordWriter};
use crate::rng::DeterministicRng;
use anyhow::{anyhow, bail, Context, Result};
use std::path::{Path, PathBuf};

/// Summary of one completed run, returned to the caller for logging/tests.
#[derive(Debug, Clone)]
pub struct ShuffleReport {
    pub effective_seed: String,
    pub pairs: Vec<PairReport>,
}

#[derive(Debug, Clone)]
pub struct PairReport {
    pub reads_path: PathBuf,
    pub mates_path: PathBuf,
    pub reads_out: PathBuf,
    pub mates_out: PathBuf,
    pub record_count: u64,
    pub bucket_count: u64,
}

/// A configured shuffle run, ready for `.run()`.
pub struct ShuffleJob {
    cfg: ShuffleConfig,
}

impl ShuffleJob {
    pub fn new(cfg: ShuffleConfig) -> Result<Self> {
        if cfg.reads.is_empty() || cfg.mates.is_empty() {
            bail!("required parameter are --reads and --mates");
        }
        if cfg.reads.len() != cfg.mates.len() {
            bail!("ERROR Number of first and second read files are different");
        }
        for p in cfg.reads.iter().chain(cfg.mates.iter()) {
            if !p.exists() {
                bail!("input file does not exist: {}", p.display());
            }
        }
        if let Some(dir) = &cfg.temp_dir {
            if !dir.exists() {
                bail!("temp directory does not exist: {}", dir.display());
            }
        }
        Ok(Self { cfg })
    }

    pub fn run(self) -> Result<ShuffleReport> {
        let cfg = &self.cfg;

        let (rng_seed_probe, effective_seed) = DeterministicRng::seed(&cfg.seed);
        drop(rng_seed_probe);
        tracing::info!(seed = %effective_seed, "effective shuffle seed");

        let max_pair_bytes = cfg
            .reads
            .iter()
            .zip(cfg.mates.iter())
            .map(|(r, m)| Ok(file_len(r)? + file_len(m)?))
            .collect::<Result<Vec<u64>>>()?
            .into_iter()
            .max()
            .unwrap_or(0);

        let (_effective_block_size, k) = cfg.resolve_bucket_count(max_pair_bytes);

        let outer_temp = match &cfg.temp_dir {
            Some(dir) => tempfile::Builder::new().prefix("fastq-shuffle-").tempdir_in(dir),
            None => tempfile::Builder::new().prefix("fastq-shuffle-").tempdir(),
        }
        .context("create temp directory")?;

        let mut pairs = Vec::with_capacity(cfg.reads.len());
        for (reads_path, mates_path) in cfg.reads.iter().zip(cfg.mates.iter()) {
            let report = self.run_pair(reads_path, mates_path, k, outer_temp.path(), &effective_seed)?;
            pairs.push(report);
        }

        Ok(ShuffleReport { effective_seed, pairs })
    }

    fn run_pair(
        &self,
        reads_path: &Path,
        mates_path: &Path,
        k: u64,
        temp_root: &Path,
        seed: &str,
    ) -> Result<PairReport> {
        let cfg = &self.cfg;

        let reads_out = output_path(reads_path, cfg.outdir.as_deref())?;
        let mates_out = output_path(mates_path, cfg.outdir.as_deref())?;

        let pair_temp_dir = temp_root.join(unique_pair_dir_name(reads_path));
        std::fs::create_dir_all(&pair_temp_dir).context("create per-pair spill directory")?;

        let (mut rng, _) = DeterministicRng::seed(seed);

        let mut reader = PairReader::open(reads_path, mates_path, cfg.read_buffer_bytes)?;
        let mut dist = Distributor::new(&pair_temp_dir, k as usize)?;

        let total_bytes = file_len(reads_path)? + file_len(mates_path)?;
        let dist_progress = ProgressScope::bytes(
            cfg.progress,
            format!("Distributing {}", file_name(reads_path)),
            total_bytes,
        );

        let mut a = Vec::new();
        let mut b = Vec::new();
        let mut record_count: u64 = 0;
        while reader.next_pair(&mut a, &mut b)?.is_some() {
            dist.route(&mut rng, &a, &b)?;
            dist_progress.inc((a.len() + b.len()) as u64);
            record_count += 1;
        }
        dist.finish_writing()?;
        dist_progress.finish(format!("{record_count} record pairs distributed"));

        let mut out_a = RecordWriter::create(&reads_out, cfg.write_buffer_bytes)?;
        let mut out_b = RecordWriter::create(&mates_out, cfg.write_buffer_bytes)?;

        let permute_progress =
            ProgressScope::count(cfg.progress, "Permuting buckets", k + 1);

        let (mut memory_rng, _) = DeterministicRng::seed_for_bucket(seed, -1);
        permute_and_append(&mut dist.memory, &mut memory_rng, &mut out_a, &mut out_b)?;
        permute_progress.inc(1);

        for (spill_idx, spill) in dist.spills.into_iter().enumerate() {
            let mut bucket = spill.load()?;
            let (mut bucket_rng, _) = DeterministicRng::seed_for_bucket(seed, spill_idx as i64);
            permute_and_append(&mut bucket, &mut bucket_rng, &mut out_a, &mut out_b)?;
            permute_progress.inc(1);
        }
        permute_progress.finish("done");

        out_a.flush()?;
        out_b.flush()?;

        std::fs::remove_dir_all(&pair_temp_dir).ok();

        Ok(PairReport {
            reads_path: reads_path.to_path_buf(),
            mates_path: mates_path.to_path_buf(),
            reads_out,
            mates_out,
            record_count,
            bucket_count: k + 1,
        })
    }
}

fn file_len(p: &Path) -> Result<u64> {
    Ok(std::fs::metadata(p).with_context(|| format!("stat {}", p.display()))?.len())
}

fn file_name(p: &Path) -> String {
    p.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

fn unique_pair_dir_name(reads_path: &Path) -> String {
    format!("pair-{}", file_name(reads_path))
}

/// `<input>.shuffled` in `outdir` (if given) or alongside the input; fails
/// if the output already exists.
fn output_path(input: &Path, outdir: Option<&Path>) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .ok_or_else(|| anyhow!("input path has no file name: {}", input.display()))?;
    let mut out_name = file_name.to_os_string();
    out_name.push(".shuffled");

    let dir = match outdir {
        Some(d) => d.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(".")),
    };
    let out_path = dir.join(out_name);
    if out_path.exists() {
        bail!("output file already exists: {}", out_path.display());
    }
    Ok(out_path)
}

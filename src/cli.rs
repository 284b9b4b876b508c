//! Command-line surface: a `clap`-derived parser that converts into a
//! `ShuffleConfig`.

use crate::config::{NumTempFiles, ShuffleConfig};
use crate::sizeparse::parse_size;
use clap::Parser;
use std::path::PathBuf;

/// Shuffle paired-end FASTQ files without loading either file fully into memory.
#[derive(Parser, Debug)]
#[command(
    name = "fastq-shuffle",
    version = concat!("v", env!("CARGO_PKG_VERSION")),
    about,
    long_about = None
)]
pub struct Cli {
    /// First-read (R1) FASTQ file(s). Repeatable; a single occurrence may
    /// also be a comma-separated list.
    #[arg(short = '1', long = "reads", value_delimiter = ',')]
    pub reads: Vec<PathBuf>,

    /// Second-read (R2) FASTQ file(s), same count and order as `--reads`.
    #[arg(short = '2', long = "mates", value_delimiter = ',')]
    pub mates: Vec<PathBuf>,

    /// Number of spill buckets: `auto` (default) sizes from `--shuffle-block-size`,
    /// or a fixed positive integer. Non-positive or non-numeric values fall
    /// back to `auto` with a warning (see DESIGN.md).
    #[arg(short = 't', long = "num-temp-files", default_value = "auto")]
    pub num_temp_files: String,

    /// Target in-memory block size per spill bucket, e.g. "1G", "512M", "256KiB".
    #[arg(short = 's', long = "shuffle-block-size", default_value = "1G")]
    pub shuffle_block_size: String,

    /// Directory to hold spill files during the run (defaults to the system temp dir).
    #[arg(short = 'd', long = "temp-directory")]
    pub temp_directory: Option<PathBuf>,

    /// Random seed; empty/unset falls back to the current wall-clock seconds.
    #[arg(short = 'r', long = "seed", visible_alias = "randomseed", default_value = "")]
    pub seed: String,

    /// Output directory for `<input>.shuffled` files (defaults alongside each input).
    #[arg(short = 'o', long = "outdir")]
    pub outdir: Option<PathBuf>,

    /// Increase logging verbosity; may be repeated (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Force debug-level logging regardless of `-v`.
    #[arg(short = 'D', long = "debug")]
    pub debug: bool,

    /// Disable progress bars (useful for non-interactive logs).
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

impl Cli {
    /// Build a `ShuffleConfig` from parsed arguments. Size-string and
    /// num-temp-files parsing failures are reported as warnings, not fatal
    /// errors (see DESIGN.md).
    pub fn into_config(self) -> ShuffleConfig {
        let block_size_bytes = match parse_size(&self.shuffle_block_size) {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(%e, value = %self.shuffle_block_size, "invalid --shuffle-block-size, using 1G");
                1024 * 1024 * 1024
            }
        };

        let num_temp_files = parse_num_temp_files(&self.num_temp_files);

        ShuffleConfig::default()
            .with_reads(self.reads)
            .with_mates(self.mates)
            .with_block_size_bytes(block_size_bytes)
            .with_num_temp_files(num_temp_files)
            .with_seed(self.seed)
            .with_progress(!self.no_progress)
            .with_outdir_opt(self.outdir)
            .with_temp_dir_opt(self.temp_directory)
    }
}

fn parse_num_temp_files(raw: &str) -> NumTempFiles {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("auto") {
        return NumTempFiles::Auto;
    }
    match trimmed.parse::<i64>() {
        Ok(n) if n > 0 => NumTempFiles::Fixed(n as u64),
        Ok(_) => {
            tracing::warn!(value = %raw, "non-positive --num-temp-files, falling back to auto");
            NumTempFiles::Auto
        }
        Err(_) => {
            tracing::warn!(value = %raw, "non-numeric --num-temp-files, falling back to auto");
            NumTempFiles::Auto
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_is_case_insensitive() {
        assert_eq!(parse_num_temp_files("Auto"), NumTempFiles::Auto);
        assert_eq!(parse_num_temp_files("AUTO"), NumTempFiles::Auto);
    }

    #[test]
    fn positive_integer_is_fixed() {
        assert_eq!(parse_num_temp_files("12"), NumTempFiles::Fixed(12));
    }

    #[test]
    fn non_positive_and_garbage_fall_back_to_auto() {
        assert_eq!(parse_num_temp_files("0"), NumTempFiles::Auto);
        assert_eq!(parse_num_temp_files("-3"), NumTempFiles::Auto);
        assert_eq!(parse_num_temp_files("banana"), NumTempFiles::Auto);
    }

    #[test]
    fn parses_repeated_and_comma_separated_reads() {
        let cli = Cli::parse_from([
            "fastq-shuffle",
            "-1",
            "a.fq,b.fq",
            "-2",
            "c.fq",
            "-2",
            "d.fq",
        ]);
        assert_eq!(cli.reads, vec![PathBuf::from("a.fq"), PathBuf::from("b.fq")]);
        assert_eq!(cli.mates, vec![PathBuf::from("c.fq"), PathBuf::from("d.fq")]);
    }
}

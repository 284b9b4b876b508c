use clap::Parser;
use fastq_shuffle::cli::Cli;
use fastq_shuffle::NumTempFiles;

#[test]
fn default_shuffle_block_size_is_one_gibibyte() {
    let cli = Cli::parse_from(["fastq-shuffle", "-1", "r1.fq", "-2", "r2.fq"]);
    let cfg = cli.into_config();
    assert_eq!(cfg.block_size_bytes, 1024 * 1024 * 1024);
    assert_eq!(cfg.num_temp_files, NumTempFiles::Auto);
}

#[test]
fn invalid_shuffle_block_size_falls_back_to_default_without_erroring() {
    let cli = Cli::parse_from(["fastq-shuffle", "-1", "r1.fq", "-2", "r2.fq", "-s", "not-a-size"]);
    let cfg = cli.into_config();
    assert_eq!(cfg.block_size_bytes, 1024 * 1024 * 1024);
}

#[test]
fn explicit_fixed_num_temp_files_is_honored() {
    let cli = Cli::parse_from(["fastq-shuffle", "-1", "r1.fq", "-2", "r2.fq", "-t", "4"]);
    let cfg = cli.into_config();
    assert_eq!(cfg.num_temp_files, NumTempFiles::Fixed(4));
}

#[test]
fn no_progress_flag_disables_progress_bars() {
    let cli = Cli::parse_from(["fastq-shuffle", "-1", "r1.fq", "-2", "r2.fq", "--no-progress"]);
    let cfg = cli.into_config();
    assert!(!cfg.progress);
}

#[test]
fn verbosity_flag_stacks() {
    let cli = Cli::parse_from(["fastq-shuffle", "-1", "r1.fq", "-2", "r2.fq", "-vvv"]);
    assert_eq!(cli.verbose, 3);
}

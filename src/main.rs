use clap::Parser;
use fastq_shuffle::cli::Cli;
use fastq_shuffle::shuffle::ShuffleJob;
use fastq_shuffle::util::init_tracing;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    init_tracing(cli.verbose, cli.debug);

    let config = cli.into_config();

    let job = match ShuffleJob::new(config) {
        Ok(job) => job,
        Err(e) => {
            eprintln!("{e:#}");
            std::process::exit(1);
        }
    };

    match job.run() {
        Ok(report) => {
            for pair in &report.pairs {
                tracing::info!(
                    reads = %pair.reads_path.display(),
                    mates = %pair.mates_path.display(),
                    records = pair.record_count,
                    buckets = pair.bucket_count,
                    "shuffled"
                );
            }
        }
        Err(e) => {
            eprintln!("{e:#}");
            std::process::exit(1);
        }
    }
}

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write an `n`-record FASTQ file with headers `@{prefix}{i}`, constant
/// sequence/quality lines. Mirrors the corpus's tiny-fixture style.
pub fn write_fastq(path: &Path, n: usize, prefix: &str) {
    let mut f = File::create(path).unwrap();
    for i in 0..n {
        writeln!(f, "@{prefix}{i}").unwrap();
        writeln!(f, "ACGTACGTAC").unwrap();
        writeln!(f, "+").unwrap();
        writeln!(f, "IIIIIIIIII").unwrap();
    }
}

/// Split a FASTQ file's raw bytes into one `String` per four-line record.
pub fn records(bytes: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text.lines().collect();
    lines.chunks(4).map(|c| c.join("\n")).collect()
}

/// Numeric suffix of a record's header line, used to check that paired
/// outputs stay aligned after shuffling.
pub fn record_tag(record: &str) -> String {
    record.lines().next().unwrap_or("").chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn temp_pair(dir: &Path, n: usize) -> (PathBuf, PathBuf) {
    let r1 = dir.join("reads_1.fastq");
    let r2 = dir.join("reads_2.fastq");
    write_fastq(&r1, n, "r");
    write_fastq(&r2, n, "r");
    (r1, r2)
}

//! Lockstep four-line record reading/writing over paired inputs (C2).
//!
//! The core never parses FASTQ fields; a record pair is just two opaque
//! byte blocks, each the concatenation of four newline-terminated lines
//! read from one of the two input files.

use crate::util::{create_with_backoff, open_with_backoff};
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Buffered reader over one FASTQ file that yields raw four-line quartets.
pub struct QuartetReader {
    rdr: BufReader<File>,
    path: std::path::PathBuf,
}

impl QuartetReader {
    pub fn open(path: &Path, buf_bytes: usize) -> Result<Self> {
        let f = open_with_backoff(path, 16, 50).with_context(|| format!("open {}", path.display()))?;
        Ok(Self {
            rdr: BufReader::with_capacity(buf_bytes.max(8 * 1024), f),
            path: path.to_path_buf(),
        })
    }

    /// Read the next four lines (including their terminating newlines) into
    /// `buf`, appending. Returns `false` at a clean EOF boundary (zero bytes
    /// read before any line of the quartet); returns an error if EOF lands
    /// in the middle of a quartet (a truncated record). Lines are read as
    /// raw bytes, not `String`s, so non-UTF8 record content round-trips
    /// untouched.
    pub fn read_quartet(&mut self, buf: &mut Vec<u8>) -> Result<bool> {
        for i in 0..4 {
            let n = self
                .rdr
                .read_until(b'\n', buf)
                .with_context(|| format!("read {}", self.path.display()))?;
            if n == 0 {
                if i == 0 {
                    return Ok(false);
                }
                return Err(anyhow!(
                    "truncated record in {}: expected 4 lines, got {}",
                    self.path.display(),
                    i
                ));
            }
        }
        Ok(true)
    }
}

/// Buffered writer that appends raw record bytes with no added framing.
pub struct RecordWriter {
    w: BufWriter<File>,
}

impl RecordWriter {
    pub fn create(path: &Path, buf_bytes: usize) -> Result<Self> {
        if path.exists() {
            return Err(anyhow!("output file already exists: {}", path.display()));
        }
        let f = create_with_backoff(path, 16, 50).with_context(|| format!("create {}", path.display()))?;
        Ok(Self { w: BufWriter::with_capacity(buf_bytes.max(8 * 1024), f) })
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.w.write_all(bytes).context("write record bytes")
    }

    pub fn flush(&mut self) -> Result<()> {
        self.w.flush().context("flush record writer")
    }
}

/// One pair of input files read in lockstep, producing `(A, B)` byte pairs.
pub struct PairReader {
    reads: QuartetReader,
    mates: QuartetReader,
}

impl PairReader {
    pub fn open(reads_path: &Path, mates_path: &Path, buf_bytes: usize) -> Result<Self> {
        Ok(Self {
            reads: QuartetReader::open(reads_path, buf_bytes)?,
            mates: QuartetReader::open(mates_path, buf_bytes)?,
        })
    }

    /// Read the next record pair. Returns `None` at a clean simultaneous
    /// EOF. An unequal record count between the two files is a fatal error
    /// (see DESIGN.md's Open Question decision on this).
    pub fn next_pair(&mut self, a: &mut Vec<u8>, b: &mut Vec<u8>) -> Result<Option<()>> {
        a.clear();
        b.clear();
        let got_a = self.reads.read_quartet(a)?;
        let got_b = self.mates.read_quartet(b)?;
        match (got_a, got_b) {
            (false, false) => Ok(None),
            (true, true) => Ok(Some(())),
            (true, false) => Err(anyhow!(
                "unequal record counts: first-read file has more records than second-read file"
            )),
            (false, true) => Err(anyhow!(
                "unequal record counts: second-read file has more records than first-read file"
            )),
        }
    }
}

//! Bucket store (C3): the in-memory bucket (id 0) plus K on-disk spill
//! buckets, each a paired data file + index file.

use crate::index::{IndexEntry, PACKED_LEN};
use crate::util::{create_with_backoff, open_with_backoff};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// The always-resident bucket (id 0): a contiguous byte buffer plus its index.
#[derive(Default)]
pub struct MemoryBucket {
    pub buf: Vec<u8>,
    pub index: Vec<IndexEntry>,
}

impl MemoryBucket {
    pub fn append(&mut self, a: &[u8], b: &[u8]) {
        let offset = self.buf.len() as u64;
        self.buf.extend_from_slice(a);
        self.buf.extend_from_slice(b);
        self.index.push(IndexEntry::new(offset, a.len() as u32, b.len() as u32));
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Invariant check: buffer length matches the sum of all entry spans.
    pub fn check_invariant(&self) -> bool {
        let sum: u64 = self.index.iter().map(|e| e.len_a as u64 + e.len_b as u64).sum();
        sum == self.buf.len() as u64
    }
}

/// A single on-disk spill bucket: a data file (raw `A‖B` concatenation) and
/// an index file (packed `IndexEntry` triples), both append-only while
/// writing.
pub struct SpillBucket {
    data_path: PathBuf,
    index_path: PathBuf,
    data: BufWriter<File>,
    index: BufWriter<File>,
    offset: u64,
    entries: u64,
}

impl SpillBucket {
    /// Create a fresh pair of spill files under `dir`, named uniquely for
    /// this (input-pair, bucket-id) so buckets never mix across input pairs.
    pub fn create(dir: &Path, bucket_id: usize) -> Result<Self> {
        let data_path = dir.join(format!("bucket_{bucket_id:04}.data"));
        let index_path = dir.join(format!("bucket_{bucket_id:04}.idx"));
        let data = create_with_backoff(&data_path, 16, 50)
            .with_context(|| format!("create {}", data_path.display()))?;
        let index = create_with_backoff(&index_path, 16, 50)
            .with_context(|| format!("create {}", index_path.display()))?;
        Ok(Self {
            data_path,
            index_path,
            data: BufWriter::new(data),
            index: BufWriter::new(index),
            offset: 0,
            entries: 0,
        })
    }

    pub fn append(&mut self, a: &[u8], b: &[u8]) -> Result<()> {
        let entry = IndexEntry::new(self.offset, a.len() as u32, b.len() as u32);
        self.data.write_all(a).context("write spill data")?;
        self.data.write_all(b).context("write spill data")?;
        self.index.write_all(&entry.pack()).context("write spill index")?;
        self.offset += a.len() as u64 + b.len() as u64;
        self.entries += 1;
        Ok(())
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Flush both writers. Call once the distribution pass for this bucket
    /// is complete and before `load`.
    pub fn finish_writing(&mut self) -> Result<()> {
        self.data.flush().context("flush spill data")?;
        self.index.flush().context("flush spill index")?;
        Ok(())
    }

    /// Load the whole spill into an in-memory buffer, replacing any
    /// existing contents, then drop this bucket's own file handles.
    pub fn load(mut self) -> Result<MemoryBucket> {
        self.finish_writing()?;

        let data_file = open_with_backoff(&self.data_path, 16, 50)
            .with_context(|| format!("open {}", self.data_path.display()))?;
        let mut buf = Vec::new();
        BufReader::new(data_file)
            .read_to_end(&mut buf)
            .with_context(|| format!("read {}", self.data_path.display()))?;

        let index_file = open_with_backoff(&self.index_path, 16, 50)
            .with_context(|| format!("open {}", self.index_path.display()))?;
        let mut index_bytes = Vec::new();
        BufReader::new(index_file)
            .read_to_end(&mut index_bytes)
            .with_context(|| format!("read {}", self.index_path.display()))?;
        if index_bytes.len() % PACKED_LEN != 0 {
            anyhow::bail!(
                "corrupt spill index {}: length {} is not a multiple of {}",
                self.index_path.display(),
                index_bytes.len(),
                PACKED_LEN
            );
        }
        let index = index_bytes
            .chunks_exact(PACKED_LEN)
            .map(|c| IndexEntry::unpack(c.try_into().unwrap()))
            .collect();

        Ok(MemoryBucket { buf, index })
    }
}

impl Drop for SpillBucket {
    fn drop(&mut self) {
        let _ = self.data.flush();
        let _ = self.index.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_bucket_append_and_invariant() {
        let mut mb = MemoryBucket::default();
        mb.append(b"AAAA", b"BB");
        mb.append(b"C", b"DDDD");
        assert_eq!(mb.len(), 2);
        assert!(mb.check_invariant());
        assert_eq!(mb.index[1].offset, 6);
    }

    #[test]
    fn spill_bucket_round_trips_via_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut sb = SpillBucket::create(dir.path(), 3).unwrap();
        sb.append(b"hello", b"world").unwrap();
        sb.append(b"foo", b"barbaz").unwrap();
        assert_eq!(sb.entries(), 2);
        sb.finish_writing().unwrap();

        let mb = sb.load().unwrap();
        assert_eq!(mb.len(), 2);
        assert!(mb.check_invariant());
        assert_eq!(&mb.buf[0..5], b"hello");
        assert_eq!(&mb.buf[5..10], b"world");
        assert_eq!(mb.index[1].offset, 10);
        assert_eq!(mb.index[1].len_a, 3);
        assert_eq!(mb.index[1].len_b, 6);
    }

    #[test]
    fn spill_bucket_files_are_named_per_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = SpillBucket::create(dir.path(), 0).unwrap();
        let mut b = SpillBucket::create(dir.path(), 1).unwrap();
        a.append(b"x", b"y").unwrap();
        b.append(b"p", b"q").unwrap();
        a.finish_writing().unwrap();
        b.finish_writing().unwrap();
        assert!(dir.path().join("bucket_0000.data").exists());
        assert!(dir.path().join("bucket_0001.data").exists());
    }
}

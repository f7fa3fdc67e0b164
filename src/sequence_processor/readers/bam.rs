use crate::error::{BamuraiError, Result};
use crate::sequence_processor::core::Read;
use rust_htslib::bam::{self, Read as BamRead};
use std::path::{Path, PathBuf};

const PHRED_OFFSET: u8 = 33;

/// htslib stores 0xff in the first quality byte when a record has none.
const MISSING_QUALITY: u8 = 0xff;

pub struct BamReader {
    path: PathBuf,
    reader: bam::Reader,
    record: bam::Record,
    record_no: u64,
}

impl BamReader {
    pub fn new(path: &Path) -> Result<Self> {
        let reader = bam::Reader::from_path(path)
            .map_err(|e| BamuraiError::format(path, 0, e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            record: bam::Record::new(),
            record_no: 0,
        })
    }
}

impl Iterator for BamReader {
    type Item = Result<Read>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.reader.read(&mut self.record)?;
        self.record_no += 1;

        Some(match result {
            Ok(()) => read_from_record(&self.record),
            Err(e) => Err(BamuraiError::format(&self.path, self.record_no, e.to_string())),
        })
    }
}

pub fn read_from_record(record: &bam::Record) -> Result<Read> {
    let id = String::from_utf8_lossy(record.qname()).into_owned();
    let sequence = record.seq().as_bytes();
    let quality = phred_to_ascii(record.qual());
    Read::new(id, sequence, quality)
}

/// Numeric Phred scores to printable FASTQ quality characters.
///
/// Works over the whole slice at once so the compiler can vectorise it.
pub fn phred_to_ascii(qual: &[u8]) -> Vec<u8> {
    if qual.first() == Some(&MISSING_QUALITY) {
        return vec![PHRED_OFFSET; qual.len()];
    }
    qual.iter().map(|&q| q.saturating_add(PHRED_OFFSET)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phred_to_ascii() {
        assert_eq!(phred_to_ascii(&[0, 10, 40, 93]), b"!+I~".to_vec());
        assert!(phred_to_ascii(&[]).is_empty());
    }

    #[test]
    fn test_missing_quality_is_q0() {
        assert_eq!(phred_to_ascii(&[0xff, 0xff, 0xff]), b"!!!".to_vec());
    }

    #[test]
    fn test_read_from_record() {
        let mut record = bam::Record::new();
        record.set(b"read1", None, b"ACGT", &[30, 30, 20, 10]);

        let read = read_from_record(&record).unwrap();
        assert_eq!(read.id(), "read1");
        assert_eq!(read.sequence(), b"ACGT");
        assert_eq!(read.quality(), b"??5+");
    }
}

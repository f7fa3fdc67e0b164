mod bam;
mod fastq;

pub use bam::{phred_to_ascii, read_from_record, BamReader};
pub use fastq::FastqReader;

use crate::error::Result;
use crate::sequence_processor::core::Read;
use std::path::Path;

const FASTQ_EXTENSIONS: [&str; 4] = [".fastq", ".fq", ".fastq.gz", ".fq.gz"];

pub fn is_fastq(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    FASTQ_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// A single-pass stream of reads from either input format.
pub enum ReadSource {
    Bam(BamReader),
    Fastq(FastqReader),
}

impl ReadSource {
    /// FASTQ is recognised by extension; everything else goes through htslib.
    pub fn open(path: &Path, fastq_buffer_capacity: usize) -> Result<Self> {
        if is_fastq(path) {
            log::debug!("Reading {} as FASTQ", path.display());
            Ok(ReadSource::Fastq(FastqReader::new(path, fastq_buffer_capacity)?))
        } else {
            log::debug!("Reading {} as an alignment file", path.display());
            Ok(ReadSource::Bam(BamReader::new(path)?))
        }
    }
}

impl Iterator for ReadSource {
    type Item = Result<Read>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ReadSource::Bam(reader) => reader.next(),
            ReadSource::Fastq(reader) => reader.next(),
        }
    }
}

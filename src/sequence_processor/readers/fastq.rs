use crate::error::{BamuraiError, Result};
use crate::sequence_processor::core::Read;
use bio::io::fastq;
use niffler::get_reader;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Plain or compressed FASTQ, one four-line record at a time.
pub struct FastqReader {
    path: PathBuf,
    records: fastq::Records<BufReader<Box<dyn io::Read>>>,
    record_no: u64,
}

impl FastqReader {
    pub fn new(path: &Path, buffer_capacity: usize) -> Result<Self> {
        let file = File::open(path)?;
        // niffler needs a few leading bytes to sniff the compression format
        let inner: Box<dyn io::Read> = if file.metadata()?.len() == 0 {
            Box::new(file)
        } else {
            let (inner_reader, compression) = get_reader(Box::new(file))
                .map_err(|e| BamuraiError::format(path, 0, e.to_string()))?;
            log::debug!("{}: detected {:?} compression", path.display(), compression);
            inner_reader
        };

        let reader = fastq::Reader::from_bufread(BufReader::with_capacity(buffer_capacity, inner));
        Ok(Self {
            path: path.to_path_buf(),
            records: reader.records(),
            record_no: 0,
        })
    }
}

impl Iterator for FastqReader {
    type Item = Result<Read>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.records.next()?;
        self.record_no += 1;

        Some(match result {
            Ok(record) => Read::new(record.id(), record.seq(), record.qual()),
            Err(e) => Err(BamuraiError::format(&self.path, self.record_no, e.to_string())),
        })
    }
}

use crate::error::{BamuraiError, Result};
use rust_htslib::bam::{self, record::Aux, Read as BamRead};
use std::path::Path;

/// The slice of an alignment record the sample engines need: string tags.
pub trait TaggedRecord {
    fn string_tag(&self, tag: &[u8; 2]) -> Option<&str>;

    /// Set `tag` to `value`, replacing any existing value.
    fn set_string_tag(&mut self, tag: &[u8; 2], value: &str) -> Result<()>;
}

/// Destination for alignment records.
pub trait RecordSink<R> {
    fn write_record(&mut self, record: &R) -> Result<()>;
}

impl TaggedRecord for bam::Record {
    fn string_tag(&self, tag: &[u8; 2]) -> Option<&str> {
        match self.aux(tag) {
            Ok(Aux::String(value)) => Some(value),
            _ => None,
        }
    }

    fn set_string_tag(&mut self, tag: &[u8; 2], value: &str) -> Result<()> {
        if self.aux(tag).is_ok() {
            self.remove_aux(tag)?;
        }
        self.push_aux(tag, Aux::String(value))?;
        Ok(())
    }
}

impl RecordSink<bam::Record> for bam::Writer {
    fn write_record(&mut self, record: &bam::Record) -> Result<()> {
        self.write(record)?;
        Ok(())
    }
}

/// Records of an open alignment file, numbered for error reporting.
pub fn bam_records<'a>(
    reader: &'a mut bam::Reader,
    path: &'a Path,
) -> impl Iterator<Item = Result<bam::Record>> + 'a {
    reader
        .records()
        .enumerate()
        .map(move |(i, result)| {
            result.map_err(|e| BamuraiError::format(path, i as u64 + 1, e.to_string()))
        })
}

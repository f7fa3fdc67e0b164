use crate::config::Config;
use crate::error::BamuraiError;
use crate::sequence_processor::readers::{is_fastq, FastqReader};
use anyhow::{Context, Result};
use std::path::Path;

/// Stream a FASTQ file end to end and return its record count.
/// The first malformed record aborts with its record number.
pub fn run(reads: &Path, config: &Config) -> Result<u64> {
    if !is_fastq(reads) {
        return Err(BamuraiError::format(reads, 0, "File must be in FASTQ format").into());
    }

    let reader = FastqReader::new(reads, config.fastq_buffer_capacity)
        .with_context(|| format!("Failed to open {}", reads.display()))?;

    let mut records = 0u64;
    for read in reader {
        read.with_context(|| format!("Error at record {}", records + 1))?;
        records += 1;
    }

    println!("FASTQ file is valid. {} records checked.", records);
    Ok(records)
}

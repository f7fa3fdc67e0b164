use crate::error::Result;
use crate::fragment::{split, SplitMode};
use crate::sequence_processor::core::{ProcessingStats, Read, SequenceProcessor};
use std::io::Write;

/// Fragments each incoming read and writes the pieces as FASTQ.
pub struct FragmentWriter<W: Write> {
    mode: SplitMode,
    out: W,
    reads: u64,
    fragments: u64,
    fragment_bases: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentSummary {
    pub reads: u64,
    pub fragments: u64,
    pub fragment_bases: u64,
}

impl FragmentSummary {
    pub fn mean_length(&self) -> Option<f64> {
        (self.fragments > 0).then(|| self.fragment_bases as f64 / self.fragments as f64)
    }
}

impl<W: Write> FragmentWriter<W> {
    pub fn new(mode: SplitMode, out: W) -> Self {
        Self {
            mode,
            out,
            reads: 0,
            fragments: 0,
            fragment_bases: 0,
        }
    }
}

impl<W: Write> SequenceProcessor for FragmentWriter<W> {
    type Output = FragmentSummary;

    fn process_sequence(&mut self, read: Read) -> Result<()> {
        let plan = self.mode.plan(read.len());
        self.reads += 1;

        for fragment in split(read, &plan)? {
            fragment.write_text_record(&mut self.out)?;
            self.out.write_all(b"\n")?;
            self.fragments += 1;
            self.fragment_bases += fragment.len() as u64;
        }
        Ok(())
    }

    fn update_progress(&mut self, stats: &ProcessingStats) {
        log::debug!(
            "{} reads split into {} fragments",
            stats.processed,
            self.fragments
        );
    }

    fn finalize(mut self) -> Result<FragmentSummary> {
        self.out.flush()?;
        Ok(FragmentSummary {
            reads: self.reads,
            fragments: self.fragments,
            fragment_bases: self.fragment_bases,
        })
    }
}

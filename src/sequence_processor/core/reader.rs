use super::processor::SequenceProcessor;
use super::read::Read;
use super::stats::ProcessingStats;
use crate::error::Result;
use indicatif::ProgressBar;

const PROGRESS_INTERVAL: u64 = 1000;

/// Drives a read stream into a [`SequenceProcessor`].
///
/// Any iterator of `Result<Read>` is a reader; the first error aborts the
/// stream and is returned to the caller.
pub trait SequenceReader: Iterator<Item = Result<Read>> + Sized {
    fn read_sequences<P: SequenceProcessor>(
        self,
        mut processor: P,
        progress: &ProgressBar,
    ) -> Result<(ProcessingStats, P::Output)> {
        let mut stats = ProcessingStats::default();

        for read in self {
            processor.process_sequence(read?)?;
            stats.processed += 1;

            if stats.processed % PROGRESS_INTERVAL == 0 {
                progress.set_position(stats.processed);
                processor.update_progress(&stats);
            }
        }

        progress.set_position(stats.processed);
        Ok((stats, processor.finalize()?))
    }
}

impl<I: Iterator<Item = Result<Read>>> SequenceReader for I {}

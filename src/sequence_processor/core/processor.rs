use super::read::Read;
use super::stats::ProcessingStats;
use crate::error::Result;

/// Consumer side of a read stream. Each read is handed over by value so a
/// processor can rename or slice it without copying.
pub trait SequenceProcessor {
    type Output;

    fn process_sequence(&mut self, read: Read) -> Result<()>;

    fn update_progress(&mut self, _stats: &ProcessingStats) {}

    fn finalize(self) -> Result<Self::Output>;
}

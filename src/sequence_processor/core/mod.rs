pub(crate) mod processor;
pub(crate) mod read;
pub(crate) mod stats;
mod reader;

pub use processor::SequenceProcessor;
pub use read::{Read, Side};
pub use reader::SequenceReader;
pub use stats::ProcessingStats;

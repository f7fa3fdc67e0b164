pub mod collectors;
pub mod core;
pub mod readers;

// Re-export commonly used items
pub use self::core::{Read, SequenceProcessor, SequenceReader};
pub use readers::ReadSource;

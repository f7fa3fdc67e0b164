pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fragment;
pub mod samples;
pub mod sequence_processor;
mod utils;

pub use error::{BamuraiError, Result};
pub use fragment::{calculate_divide, calculate_split, split, SplitMode, SplitPlan};
pub use sequence_processor::core::Side;
pub use sequence_processor::{Read, ReadSource};

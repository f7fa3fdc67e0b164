pub mod fragments;
pub mod read_stats;

pub use fragments::{FragmentSummary, FragmentWriter};
pub use read_stats::{calc_n50, ReadStats, ReadStatsCollector};

pub mod assign_samples;
pub mod extract_sample;
pub mod split;
pub mod split_samples;
pub mod stats;
pub mod validate;

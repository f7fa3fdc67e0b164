pub(crate) mod output;
pub(crate) mod progress_bar_builder;

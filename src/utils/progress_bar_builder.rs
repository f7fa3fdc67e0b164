use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const READ_COUNTER_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] {msg} {pos} reads ({per_sec})";

/// Spinners for read streams of unknown length, drawn on stderr.
pub(crate) struct ProgressBarBuilder {
    template: &'static str,
    message: String,
    tick: Duration,
}

impl ProgressBarBuilder {
    /// Spinner that shows how many reads have gone through a stream.
    pub(crate) fn read_counter(message: impl Into<String>) -> Self {
        Self {
            template: READ_COUNTER_TEMPLATE,
            message: message.into(),
            tick: Duration::from_millis(200),
        }
    }

    pub(crate) fn build(self) -> Result<ProgressBar> {
        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        pb.set_style(ProgressStyle::default_spinner().template(self.template)?);
        pb.set_message(self.message);
        pb.enable_steady_tick(self.tick);
        Ok(pb)
    }
}

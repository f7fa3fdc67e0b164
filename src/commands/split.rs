use crate::config::Config;
use crate::fragment::SplitMode;
use crate::sequence_processor::collectors::{FragmentSummary, FragmentWriter};
use crate::sequence_processor::{ReadSource, SequenceReader};
use crate::utils::output::AtomicOutput;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::time::Instant;

/// Fragment every read of `reads` and write the pieces as FASTQ to `output`,
/// or to stdout when no output is given.
pub fn run(reads: &Path, mode: SplitMode, output: Option<&Path>, config: &Config) -> Result<FragmentSummary> {
    let start_time = Instant::now();
    log::info!("Running bamurai split on {}", reads.display());
    match mode {
        SplitMode::TargetLength(target_len) => log::info!("  Target length: {}", target_len),
        SplitMode::Divide {
            num_fragments,
            min_length,
        } => log::info!(
            "  Fragments per read: {} (minimum fragment length {})",
            num_fragments,
            min_length
        ),
    }

    let source = ReadSource::open(reads, config.fastq_buffer_capacity)
        .with_context(|| format!("Failed to open {}", reads.display()))?;
    let progress = ProgressBarBuilder::read_counter("Splitting").build()?;

    let summary = match output {
        Some(path) => {
            log::info!("  Output file: {}", path.display());
            let out = AtomicOutput::new(path)?;
            let file = File::create(out.path())
                .with_context(|| format!("Failed to create {}", out.path().display()))?;
            let (_, summary) = source.read_sequences(FragmentWriter::new(mode, BufWriter::new(file)), &progress)?;
            out.commit()?;
            summary
        }
        None => {
            let stdout = io::stdout();
            let writer = FragmentWriter::new(mode, BufWriter::new(stdout.lock()));
            let (_, summary) = source.read_sequences(writer, &progress)?;
            summary
        }
    };
    progress.finish_and_clear();

    // stdout may carry the FASTQ, so the report goes to stderr
    eprintln!("Split {} reads into {} fragments", summary.reads, summary.fragments);
    match summary.mean_length() {
        Some(mean) => eprintln!("Average split read length: {}", mean.round_ties_even()),
        None => eprintln!("Average split read length: undefined (no reads)"),
    }
    eprintln!("Time taken: {:.2} seconds", start_time.elapsed().as_secs_f64());

    Ok(summary)
}

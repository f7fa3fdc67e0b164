use crate::cli::StatsFormat;
use crate::config::Config;
use crate::sequence_processor::collectors::{ReadStats, ReadStatsCollector};
use crate::sequence_processor::{ReadSource, SequenceReader};
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct StatsReport<'a> {
    file: &'a str,
    #[serde(flatten)]
    stats: &'a ReadStats,
}

pub fn run(reads: &Path, format: StatsFormat, config: &Config) -> Result<ReadStats> {
    let source = ReadSource::open(reads, config.fastq_buffer_capacity)
        .with_context(|| format!("Failed to open {}", reads.display()))?;
    let progress = ProgressBarBuilder::read_counter("Collecting read statistics").build()?;

    let (_, stats) = source
        .read_sequences(ReadStatsCollector::new(), &progress)
        .with_context(|| format!("Failed to read {}", reads.display()))?;
    progress.finish_and_clear();

    let file = reads.display().to_string();
    match format {
        StatsFormat::Summary => println!("{}", stats.to_summary(&file)),
        StatsFormat::Tsv => {
            println!("{}", ReadStats::tsv_header());
            println!("{}", stats.to_tsv_line(&file));
        }
        StatsFormat::Json => {
            let report = StatsReport { file: &file, stats: &stats };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(stats)
}

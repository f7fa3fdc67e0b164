use crate::error::Result;
use crate::sequence_processor::core::{Read, SequenceProcessor};
use serde::Serialize;

/// Summary of a read collection.
///
/// `mean_length` and `n50` are `None` for an empty collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadStats {
    pub count: u64,
    pub total_bases: u64,
    pub mean_length: Option<f64>,
    pub n50: Option<usize>,
}

impl ReadStats {
    pub fn from_lengths(mut lengths: Vec<usize>) -> Self {
        let count = lengths.len() as u64;
        let total_bases: u64 = lengths.iter().map(|&l| l as u64).sum();
        let mean_length = (count > 0).then(|| total_bases as f64 / count as f64);
        let n50 = calc_n50(&mut lengths);

        ReadStats {
            count,
            total_bases,
            mean_length,
            n50,
        }
    }

    pub fn tsv_header() -> &'static str {
        "file\tread_count\tthroughput\tmean_length\tn50"
    }

    pub fn to_tsv_line(&self, file: &str) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            file,
            self.count,
            self.total_bases,
            self.mean_length
                .map_or_else(|| "NA".to_string(), |m| format!("{:.2}", m)),
            self.n50.map_or_else(|| "NA".to_string(), |n| n.to_string()),
        )
    }

    pub fn to_summary(&self, file: &str) -> String {
        let mut lines = vec![
            format!("Statistics for {}:", file),
            format!("  Total reads: {}", self.count),
        ];
        match (self.mean_length, self.n50) {
            (Some(mean), Some(n50)) => {
                lines.push(format!("  Average read length: {:.2}", mean));
                lines.push(format!("  Throughput (bp): {}", self.total_bases));
                lines.push(format!("  N50: {}", n50));
            }
            _ => {
                lines.push("  Average read length: undefined (no reads)".to_string());
                lines.push(format!("  Throughput (bp): {}", self.total_bases));
                lines.push("  N50: undefined (no reads)".to_string());
            }
        }
        lines.join("\n")
    }
}

/// Length of the read at which the descending running sum first reaches half
/// of all bases. Sorts `lengths` in place.
pub fn calc_n50(lengths: &mut [usize]) -> Option<usize> {
    if lengths.is_empty() {
        return None;
    }
    lengths.sort_unstable_by(|a, b| b.cmp(a));
    let total: u64 = lengths.iter().map(|&l| l as u64).sum();

    let mut acc = 0u64;
    for &len in lengths.iter() {
        acc += len as u64;
        if 2 * acc >= total {
            return Some(len);
        }
    }
    lengths.last().copied()
}

/// Collects every read length from a stream for [`ReadStats`].
#[derive(Debug, Default)]
pub struct ReadStatsCollector {
    lengths: Vec<usize>,
}

impl ReadStatsCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SequenceProcessor for ReadStatsCollector {
    type Output = ReadStats;

    fn process_sequence(&mut self, read: Read) -> Result<()> {
        self.lengths.push(read.len());
        Ok(())
    }

    fn finalize(self) -> Result<ReadStats> {
        Ok(ReadStats::from_lengths(self.lengths))
    }
}

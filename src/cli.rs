use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Bamurai: a tool for processing long-read BAM and FASTQ files", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatsFormat {
    /// Human readable summary
    #[default]
    Summary,
    /// One tab separated line: file, read count, throughput, mean length, N50
    Tsv,
    /// JSON object
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split reads to a target length
    Split {
        /// Input reads file (BAM, FASTQ or FASTQ.gz)
        reads: PathBuf,
        /// Target length for splitting reads
        #[arg(short = 'l', long = "len-target", allow_negative_numbers = true)]
        len_target: i64,
        /// Output FASTQ file (default: stdout)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Divide every read into a fixed number of fragments
    Divide {
        /// Input reads file (BAM, FASTQ or FASTQ.gz)
        reads: PathBuf,
        /// Number of fragments per read
        #[arg(short = 'n', long = "num-fragments", allow_negative_numbers = true)]
        num_fragments: i64,
        /// Reads whose fragments would be shorter than this are left whole
        #[arg(short = 'm', long = "min-length", default_value = "0")]
        min_length: usize,
        /// Output FASTQ file (default: stdout)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Read count, throughput, mean length and N50 of a reads file
    Stats {
        /// Input reads file (BAM, FASTQ or FASTQ.gz)
        reads: PathBuf,
        /// Output format
        #[arg(short = 'f', long = "format", value_enum, default_value_t = StatsFormat::Summary)]
        format: StatsFormat,
    },

    /// Write each read's donor id into its RG tag using a barcode table
    AssignSamples {
        /// Input BAM file
        bam: PathBuf,
        /// Barcode to donor table (TSV or CSV)
        #[arg(long = "tsv")]
        table: PathBuf,
        /// Output BAM file
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
        /// Column holding barcodes (default: 'barcode' or 'cell')
        #[arg(long = "barcode-column")]
        barcode_column: Option<String>,
        /// Column holding donor ids (default: 'donor_id')
        #[arg(long = "donor-id-column")]
        donor_id_column: Option<String>,
    },

    /// Extract the reads of a single donor
    ExtractSample {
        /// Input BAM file
        bam: PathBuf,
        /// Barcode to donor table (TSV or CSV)
        #[arg(long = "tsv")]
        table: PathBuf,
        /// Donor to extract
        #[arg(long = "donor-id")]
        donor_id: String,
        /// Output BAM file
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
    },

    /// Split a BAM file into one file per donor plus unmapped reads
    SplitSamples {
        /// Input BAM file
        bam: PathBuf,
        /// Barcode to donor table (TSV or CSV)
        #[arg(long = "tsv")]
        table: PathBuf,
        /// Directory for the per-donor BAM files
        #[arg(short = 'o', long = "output-dir")]
        output_dir: PathBuf,
    },

    /// Check that a FASTQ file is well formed
    Validate {
        /// FASTQ or FASTQ.gz file
        reads: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_split() {
        let args = Args::try_parse_from(["bamurai", "split", "in.bam", "-l", "10000"]).unwrap();
        match args.command {
            Commands::Split {
                reads,
                len_target,
                output,
            } => {
                assert_eq!(reads, PathBuf::from("in.bam"));
                assert_eq!(len_target, 10000);
                assert!(output.is_none());
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn test_parse_stats_format() {
        let args = Args::try_parse_from(["bamurai", "stats", "in.fq", "--format", "tsv"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Stats {
                format: StatsFormat::Tsv,
                ..
            }
        ));
    }
}

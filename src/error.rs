use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BamuraiError>;

/// Errors raised by the read engines.
///
/// Every variant carries enough context (read id, record number, column,
/// parameter) to locate the failure in a large batch.
#[derive(Debug, Error)]
pub enum BamuraiError {
    #[error("Sequence and quality strings must be of equal length ({seq_len} != {qual_len}). Offending read: {read_id}")]
    Validation {
        read_id: String,
        seq_len: usize,
        qual_len: usize,
    },

    #[error("Malformed input {path} at record {record}: {message}")]
    Format {
        path: PathBuf,
        record: u64,
        message: String,
    },

    #[error("Invalid value for {name}: {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        reason: &'static str,
    },

    #[error("Invalid split plan for read {read_id}: {message}")]
    Plan { read_id: String, message: String },

    #[error("No '{column}' column found in {path}. Please specify the column explicitly.")]
    MissingColumn { column: String, path: PathBuf },

    #[error("Both 'cell' and 'barcode' columns are present in {path}. Please specify the barcode column explicitly.")]
    AmbiguousColumn { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("BAM/CRAM error: {0}")]
    Hts(#[from] rust_htslib::errors::Error),

    #[error("Table error: {0}")]
    Csv(#[from] csv::Error),
}

impl BamuraiError {
    pub(crate) fn format(path: impl Into<PathBuf>, record: u64, message: impl Into<String>) -> Self {
        BamuraiError::Format {
            path: path.into(),
            record,
            message: message.into(),
        }
    }

    pub(crate) fn plan(read_id: &str, message: impl Into<String>) -> Self {
        BamuraiError::Plan {
            read_id: read_id.to_string(),
            message: message.into(),
        }
    }
}

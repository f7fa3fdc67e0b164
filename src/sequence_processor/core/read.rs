use crate::error::{BamuraiError, Result};
use std::io::{self, Write};

/// A single sequenced read with its per-base quality string.
///
/// A `Read` can only be built through [`Read::new`], which rejects a
/// quality string whose length differs from the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Read {
    id: String,
    sequence: Vec<u8>,
    quality: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Read {
    pub fn new(
        id: impl Into<String>,
        sequence: impl Into<Vec<u8>>,
        quality: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let read = Self {
            id: id.into(),
            sequence: sequence.into(),
            quality: quality.into(),
        };
        read.validate()?;
        Ok(read)
    }

    fn validate(&self) -> Result<()> {
        if self.sequence.len() != self.quality.len() {
            return Err(BamuraiError::Validation {
                read_id: self.id.clone(),
                seq_len: self.sequence.len(),
                qual_len: self.quality.len(),
            });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn quality(&self) -> &[u8] {
        &self.quality
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Used by a single-fragment split, the only in-place change a read sees.
    pub(crate) fn append_id_suffix(&mut self, index: usize) {
        self.id = format!("{}_{}", self.id, index);
    }

    /// Copy of `[start, end)` as a new read named `{id}_{index}`.
    pub(crate) fn slice(&self, start: usize, end: usize, index: usize) -> Result<Self> {
        Read::new(
            format!("{}_{}", self.id, index),
            &self.sequence[start..end],
            &self.quality[start..end],
        )
    }

    /// Keep `n` bases from one end. Reads no longer than `n` come back as-is.
    pub fn keep_n_bases(self, n: usize, side: Side) -> Result<Self> {
        let len = self.len();
        if n >= len {
            return Ok(self);
        }
        let (start, end) = match side {
            Side::Left => (0, n),
            Side::Right => (len - n, len),
        };
        Read::new(
            self.id.clone(),
            &self.sequence[start..end],
            &self.quality[start..end],
        )
    }

    /// Four-line FASTQ text without a trailing newline.
    pub fn to_text_record(&self) -> String {
        format!(
            "@{}\n{}\n+\n{}",
            self.id,
            String::from_utf8_lossy(&self.sequence),
            String::from_utf8_lossy(&self.quality)
        )
    }

    /// Same layout as [`Read::to_text_record`], written straight to `out`.
    pub fn write_text_record<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(b"@")?;
        out.write_all(self.id.as_bytes())?;
        out.write_all(b"\n")?;
        out.write_all(&self.sequence)?;
        out.write_all(b"\n+\n")?;
        out.write_all(&self.quality)
    }
}

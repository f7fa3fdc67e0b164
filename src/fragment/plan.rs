use crate::error::{BamuraiError, Result};

/// Cut offsets into a read, strictly increasing and strictly inside `(0, len)`.
/// An empty plan leaves the read whole.
pub type SplitPlan = Vec<usize>;

/// How a read stream is cut into fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Pieces close to this many bases each.
    TargetLength(usize),
    /// Exactly this many pieces, provided none drops below `min_length`.
    Divide {
        num_fragments: usize,
        min_length: usize,
    },
}

impl SplitMode {
    pub fn target_length(target_len: i64) -> Result<Self> {
        Ok(SplitMode::TargetLength(positive("target_len", target_len)?))
    }

    pub fn divide(num_fragments: i64, min_length: usize) -> Result<Self> {
        Ok(SplitMode::Divide {
            num_fragments: positive("num_fragments", num_fragments)?,
            min_length,
        })
    }

    pub fn plan(&self, len: usize) -> SplitPlan {
        match *self {
            SplitMode::TargetLength(target_len) => plan_target_length(len, target_len),
            SplitMode::Divide {
                num_fragments,
                min_length,
            } => plan_divide(len, num_fragments, min_length),
        }
    }
}

fn positive(name: &'static str, value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(BamuraiError::InvalidParameter {
            name,
            value,
            reason: "must be greater than zero",
        });
    }
    usize::try_from(value).map_err(|_| BamuraiError::InvalidParameter {
        name,
        value,
        reason: "out of range",
    })
}

/// Piece count for a read of `len` bases aimed at `target_len` bases each:
/// `len / target_len` rounded half to even, and never below one.
fn piece_count(len: usize, target_len: usize) -> usize {
    let whole = len / target_len;
    let twice_rem = 2 * (len % target_len);
    let rounded = if twice_rem > target_len || (twice_rem == target_len && whole % 2 == 1) {
        whole + 1
    } else {
        whole
    };
    rounded.max(1)
}

/// Cuts at `{s, 2s, ..., (pieces - 1)s}` with `s = len / pieces`.
/// The last piece takes the remainder.
fn even_cuts(len: usize, pieces: usize) -> SplitPlan {
    let size = len / pieces;
    (1..pieces).map(|i| i * size).collect()
}

fn plan_target_length(len: usize, target_len: usize) -> SplitPlan {
    if len < target_len {
        return SplitPlan::new();
    }
    even_cuts(len, piece_count(len, target_len))
}

fn plan_divide(len: usize, num_fragments: usize, min_length: usize) -> SplitPlan {
    if num_fragments < 2 {
        return SplitPlan::new();
    }
    // the shortest piece is the first one, the remainder only grows the last
    let size = len / num_fragments;
    if size == 0 || size < min_length {
        return SplitPlan::new();
    }
    even_cuts(len, num_fragments)
}

/// Split positions for `len` bases aimed at pieces of `target_len`.
pub fn calculate_split(len: usize, target_len: i64) -> Result<SplitPlan> {
    Ok(SplitMode::target_length(target_len)?.plan(len))
}

/// Split positions for exactly `num_fragments` pieces of at least `min_length`.
pub fn calculate_divide(len: usize, num_fragments: i64, min_length: usize) -> Result<SplitPlan> {
    Ok(SplitMode::divide(num_fragments, min_length)?.plan(len))
}

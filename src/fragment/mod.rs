mod plan;

pub use plan::{calculate_divide, calculate_split, SplitMode, SplitPlan};

use crate::error::{BamuraiError, Result};
use crate::sequence_processor::core::Read;

/// Cut a read at `positions` and return the fragments in order.
///
/// Fragments are named `{id}_{index}`. With an empty plan the read itself is
/// returned, renamed `{id}_0`, so every output id carries a fragment index.
pub fn split(mut read: Read, positions: &[usize]) -> Result<Vec<Read>> {
    if positions.is_empty() {
        read.append_id_suffix(0);
        return Ok(vec![read]);
    }

    check_plan(&read, positions)?;

    let mut fragments = Vec::with_capacity(positions.len() + 1);
    let mut start = 0;
    for (index, &end) in positions.iter().enumerate() {
        fragments.push(read.slice(start, end, index)?);
        start = end;
    }
    fragments.push(read.slice(start, read.len(), positions.len())?);

    Ok(fragments)
}

fn check_plan(read: &Read, positions: &[usize]) -> Result<()> {
    let len = read.len();
    let mut previous = 0;
    for &pos in positions {
        if pos == 0 || pos >= len {
            return Err(BamuraiError::plan(
                read.id(),
                format!("cut position {} is outside (0, {})", pos, len),
            ));
        }
        if pos <= previous {
            return Err(BamuraiError::plan(
                read.id(),
                format!("cut position {} does not follow {}", pos, previous),
            ));
        }
        previous = pos;
    }
    Ok(())
}

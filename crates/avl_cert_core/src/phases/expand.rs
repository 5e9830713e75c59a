use tracing::trace;

use super::{index_in, Effects};
use crate::algebra;
use crate::errors::VerifyError;
use crate::moves::ExpandMove;
use crate::state::StateKey;

/// Height increments of the two children for each of the three shapes the
/// opponent may pick when a node is split.
pub const UP: [(i32, i32); 3] = [(1, 1), (1, 2), (2, 1)];

pub(super) fn check(line: usize, mv: &ExpandMove) -> Result<Effects, VerifyError> {
    let len = mv.source.len();
    let position = index_in(line, "marked position", mv.position, len)?;
    let split = index_in(line, "split index", mv.split, len)?;
    let per_branch = ExpandMove::marks_per_branch(mv.position, mv.split);
    if mv.replies.len() != UP.len() * per_branch {
        return Err(VerifyError::structural(
            line,
            format!(
                "expand move has {} replies, expected {}",
                mv.replies.len(),
                UP.len() * per_branch
            ),
        ));
    }
    // the mark moves right by one when the split happens to its left
    let base = position + usize::from(position > split);

    let mut effects = Effects {
        writes: vec![StateKey::marked(mv.source.clone(), position)],
        reads: Vec::with_capacity(mv.replies.len()),
    };

    for (i, &up) in UP.iter().enumerate() {
        let expected = algebra::split(&mv.source, split, up).ok_or_else(|| {
            VerifyError::structural(line, format!("split index {} out of range", split))
        })?;
        for j in 0..per_branch {
            let reply = &mv.replies[j + per_branch * i];
            let expected_position = base + j;
            if reply.position != expected_position as i64 {
                return Err(VerifyError::consistency(
                    line,
                    format!(
                        "field {}: reply marks position {}, expected {}",
                        reply.field, reply.position, expected_position
                    ),
                ));
            }
            if reply.heights != expected {
                return Err(VerifyError::consistency(
                    line,
                    format!(
                        "field {}: reply vector {} does not match branch {:?} of {} split at {} (expected {})",
                        reply.field, reply.heights, up, mv.source, split, expected
                    ),
                ));
            }
            trace!(line, field = reply.field, state = %reply.heights, "expand reply accepted");
            effects
                .reads
                .push(StateKey::marked(reply.heights.clone(), expected_position));
        }
    }
    Ok(effects)
}

use super::{common_target, index_in, Effects};
use crate::algebra;
use crate::config::VerifierConfig;
use crate::errors::VerifyError;
use crate::moves::TerminalizeMove;
use crate::state::StateKey;

pub(super) fn check(
    line: usize,
    mv: &TerminalizeMove,
    config: &VerifierConfig,
) -> Result<Effects, VerifyError> {
    let position = index_in(line, "marked position", mv.position, mv.source.len())?;
    let target = common_target(line, &mv.targets, config)?;

    if mv.kept != mv.source {
        return Err(VerifyError::consistency(
            line,
            format!(
                "second vector {} differs from source {}",
                mv.kept, mv.source
            ),
        ));
    }
    let shifted = algebra::delta(&mv.source, position, config.other()).ok_or_else(|| {
        VerifyError::structural(line, format!("position {} out of range", position))
    })?;
    if mv.shifted != shifted {
        return Err(VerifyError::consistency(
            line,
            format!(
                "third vector {} is not {} shifted by {} at {} (expected {})",
                mv.shifted,
                mv.source,
                config.other(),
                position,
                shifted
            ),
        ));
    }

    Ok(Effects {
        writes: vec![StateKey::marked(mv.source.clone(), position)],
        reads: vec![
            StateKey::classified(mv.kept.clone(), target),
            StateKey::classified(shifted, target),
        ],
    })
}

use super::{common_target, index_in, Effects};
use crate::algebra;
use crate::config::VerifierConfig;
use crate::errors::VerifyError;
use crate::moves::MergeMove;
use crate::state::StateKey;

pub(super) fn check(
    line: usize,
    mv: &MergeMove,
    config: &VerifierConfig,
) -> Result<Effects, VerifyError> {
    let bound = mv.source.len().saturating_sub(1);
    let index = index_in(line, "merge index", mv.index, bound)?;
    let target = common_target(line, &mv.targets, config)?;

    let merged = algebra::merge(&mv.source, index).ok_or_else(|| {
        VerifyError::structural(line, format!("merge index {} out of range", index))
    })?;
    if mv.merged != merged {
        return Err(VerifyError::consistency(
            line,
            format!(
                "merging {} at {} gives {}, line states {}",
                mv.source, index, merged, mv.merged
            ),
        ));
    }

    Ok(Effects {
        writes: vec![StateKey::classified(mv.source.clone(), target)],
        reads: vec![StateKey::classified(merged, target)],
    })
}

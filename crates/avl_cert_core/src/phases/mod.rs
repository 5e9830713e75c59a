//! Per-phase validation of parsed moves.
//!
//! A validator never touches the reconciler: it returns the states the move
//! declares as established (`writes`) and as derived (`reads`), and the
//! caller records them only once the whole line has been accepted.

mod expand;
mod merge;
mod terminalize;

pub use expand::UP;

use crate::config::VerifierConfig;
use crate::errors::VerifyError;
use crate::moves::Move;
use crate::state::{Classification, StateKey};

/// States contributed by one accepted move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    pub writes: Vec<StateKey>,
    pub reads: Vec<StateKey>,
}

pub fn check_move(
    line: usize,
    mv: &Move,
    config: &VerifierConfig,
) -> Result<Effects, VerifyError> {
    match mv {
        Move::Expand(expand) => expand::check(line, expand),
        Move::Terminalize(terminalize) => terminalize::check(line, terminalize, config),
        Move::Merge(merge) => merge::check(line, merge, config),
    }
}

/// Bounds-checks an index read from the transcript.
fn index_in(line: usize, what: &str, value: i64, bound: usize) -> Result<usize, VerifyError> {
    usize::try_from(value)
        .ok()
        .filter(|&v| v < bound)
        .ok_or_else(|| {
            VerifyError::structural(
                line,
                format!("{} {} is outside 0..{}", what, value, bound),
            )
        })
}

/// All targets on a line must name the same outcome, and that outcome must
/// be BEST or this run's OTHER.
fn common_target(
    line: usize,
    targets: &[i64],
    config: &VerifierConfig,
) -> Result<Classification, VerifyError> {
    let first = targets[0];
    if let Some(&other) = targets.iter().find(|&&t| t != first) {
        return Err(VerifyError::structural(
            line,
            format!("targets disagree ({} vs {})", first, other),
        ));
    }
    config.classify(first).ok_or_else(|| {
        VerifyError::structural(
            line,
            format!(
                "target {} is neither BEST ({}) nor OTHER ({})",
                first,
                VerifierConfig::BEST,
                config.other()
            ),
        )
    })
}

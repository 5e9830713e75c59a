use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::VerifierConfig;
use crate::errors::VerifyError;
use crate::moves::{parse_line, MoveKind};
use crate::phases::{check_move, Effects};
use crate::state::{Classification, StateKey};
use crate::vector::HeightVector;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStats {
    pub expand: usize,
    pub terminalize: usize,
    pub merge: usize,
}

impl MoveStats {
    fn record(&mut self, kind: MoveKind) {
        match kind {
            MoveKind::Expand => self.expand += 1,
            MoveKind::Terminalize => self.terminalize += 1,
            MoveKind::Merge => self.merge += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.expand + self.terminalize + self.merge
    }
}

/// States on one side of the closure check with no counterpart on the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unmatched {
    /// Used as a precondition but never derived by any move.
    pub underived: Vec<StateKey>,
    /// Derived by some move but never used as a precondition.
    pub unconsumed: Vec<StateKey>,
}

impl Unmatched {
    pub fn is_empty(&self) -> bool {
        self.underived.is_empty() && self.unconsumed.is_empty()
    }
}

/// Run-scoped verification context.
///
/// Owns the read and write sets for one transcript. Sets only grow; a line
/// is either accepted as a whole or rejected with the first error found.
#[derive(Debug, Clone)]
pub struct Verifier {
    config: VerifierConfig,
    reads: HashSet<StateKey>,
    writes: HashSet<StateKey>,
    stats: MoveStats,
}

impl Verifier {
    pub fn new(config: VerifierConfig) -> Self {
        let best = VerifierConfig::BEST;
        let mut reads = HashSet::new();
        // single unmarked node of height BEST, position BEST
        reads.insert(StateKey::marked(HeightVector::new(vec![best]), best as usize));

        let mut writes = HashSet::new();
        writes.insert(StateKey::classified(
            HeightVector::new(vec![best]),
            Classification::Best,
        ));
        writes.insert(StateKey::classified(
            HeightVector::new(vec![config.other()]),
            Classification::Other,
        ));

        Self {
            config,
            reads,
            writes,
            stats: MoveStats::default(),
        }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn reads(&self) -> &HashSet<StateKey> {
        &self.reads
    }

    pub fn writes(&self) -> &HashSet<StateKey> {
        &self.writes
    }

    pub fn stats(&self) -> MoveStats {
        self.stats
    }

    /// Validate one transcript line. Blank lines are accepted and ignored.
    pub fn check_line(&mut self, line: usize, text: &str) -> Result<Option<MoveKind>, VerifyError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let mv = parse_line(line, text)?;
        let effects = check_move(line, &mv, &self.config)?;
        let kind = mv.kind();
        debug!(
            line,
            tag = kind.tag(),
            writes = effects.writes.len(),
            reads = effects.reads.len(),
            "move accepted"
        );
        self.apply(effects);
        self.stats.record(kind);
        Ok(Some(kind))
    }

    fn apply(&mut self, effects: Effects) {
        self.writes.extend(effects.writes);
        self.reads.extend(effects.reads);
    }

    /// Every derived state is consumed and every precondition derived.
    pub fn is_closed(&self) -> bool {
        self.reads == self.writes
    }

    pub fn unmatched(&self) -> Unmatched {
        let mut underived: Vec<StateKey> = self.writes.difference(&self.reads).cloned().collect();
        let mut unconsumed: Vec<StateKey> = self.reads.difference(&self.writes).cloned().collect();
        underived.sort();
        unconsumed.sort();
        Unmatched {
            underived,
            unconsumed,
        }
    }

    /// Final closure check, logged at the end of a run.
    pub fn reconcile(&self) -> bool {
        let closed = self.is_closed();
        if closed {
            info!(
                goal = %self.config.goal,
                states = self.reads.len(),
                moves = self.stats.total(),
                "derivation closed"
            );
        } else {
            let unmatched = self.unmatched();
            warn!(
                goal = %self.config.goal,
                underived = unmatched.underived.len(),
                unconsumed = unmatched.unconsumed.len(),
                "derivation not closed"
            );
            for key in &unmatched.underived {
                debug!(state = %key, "underived state");
            }
            for key in &unmatched.unconsumed {
                debug!(state = %key, "unconsumed state");
            }
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Goal;
    use crate::errors::ErrorKind;

    fn hv(text: &str) -> HeightVector {
        HeightVector::parse(text).expect("valid vector")
    }

    #[test]
    fn seeds_alone_do_not_close() {
        let verifier = Verifier::new(VerifierConfig::new(Goal::Insertion));
        assert!(!verifier.reconcile());
        let unmatched = verifier.unmatched();
        assert_eq!(unmatched.unconsumed, vec![StateKey::marked(hv("0"), 0)]);
        assert_eq!(
            unmatched.underived,
            vec![
                StateKey::classified(hv("-1"), Classification::Other),
                StateKey::classified(hv("0"), Classification::Best),
            ]
        );
    }

    #[test]
    fn other_seed_follows_goal() {
        let verifier = Verifier::new(VerifierConfig::new(Goal::Deletion));
        assert!(verifier
            .writes()
            .contains(&StateKey::classified(hv("1"), Classification::Other)));
    }

    #[test]
    fn single_expand_line_records_source() {
        let mut verifier = Verifier::new(VerifierConfig::new(Goal::Insertion));
        let kind = verifier
            .check_line(1, "E\t0:0:0\t11:0\t11:1\t12:0\t12:1\t21:0\t21:1")
            .expect("valid expand line");
        assert_eq!(kind, Some(MoveKind::Expand));
        assert!(verifier.writes().contains(&StateKey::marked(hv("0"), 0)));
        assert_eq!(verifier.reads().len(), 7);
        assert_eq!(verifier.stats().expand, 1);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let mut verifier = Verifier::new(VerifierConfig::new(Goal::Deletion));
        assert_eq!(verifier.check_line(1, "").unwrap(), None);
        assert_eq!(verifier.check_line(2, "   ").unwrap(), None);
        assert_eq!(verifier.stats().total(), 0);
    }

    #[test]
    fn rejected_line_leaves_sets_untouched() {
        let mut verifier = Verifier::new(VerifierConfig::new(Goal::Deletion));
        let before = (verifier.reads().clone(), verifier.writes().clone());
        let err = verifier
            .check_line(3, "T\t11:1:0\t11:0\t33:0")
            .expect_err("third vector wrong");
        assert_eq!(err.kind(), ErrorKind::Consistency);
        assert_eq!(&before.0, verifier.reads());
        assert_eq!(&before.1, verifier.writes());
    }

    #[test]
    fn terminal_pair_closes_with_merge() {
        // T produces 11:best and 21:best; both merge down to the BEST seed.
        let mut verifier = Verifier::new(VerifierConfig::new(Goal::Deletion));
        for (i, line) in ["T\t11:0:0\t11:0\t21:0", "M\t11:0:0\t0:0", "M\t21:0:0\t0:0"]
            .iter()
            .enumerate()
        {
            verifier.check_line(i + 1, line).expect("valid line");
        }
        let unmatched = verifier.unmatched();
        assert_eq!(unmatched.unconsumed, vec![StateKey::marked(hv("0"), 0)]);
        assert_eq!(
            unmatched.underived,
            vec![
                StateKey::classified(hv("1"), Classification::Other),
                StateKey::marked(hv("11"), 0),
            ]
        );
    }
}

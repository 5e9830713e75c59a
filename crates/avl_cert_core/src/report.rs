use serde::{Deserialize, Serialize};

use crate::config::Goal;
use crate::reconcile::{MoveStats, Unmatched};
use crate::state::StateKey;

pub const REPORT_SCHEMA_ID: &str = "avl-cert-report/1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Valid => "valid",
            Verdict::Invalid => "invalid",
        }
    }
}

/// Outcome of a run that got through every line without a fatal error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub schema_id: String,
    pub goal: Goal,
    pub verdict: Verdict,
    pub config_hash: String,
    pub transcript_sha256: String,
    pub lines_total: usize,
    pub moves: MoveStats,
    pub read_states: usize,
    pub write_states: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub underived: Vec<StateKey>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unconsumed: Vec<StateKey>,
}

impl VerificationReport {
    pub fn is_valid(&self) -> bool {
        self.verdict == Verdict::Valid
    }

    pub fn unmatched(&self) -> Unmatched {
        Unmatched {
            underived: self.underived.clone(),
            unconsumed: self.unconsumed.clone(),
        }
    }

    /// The one-line human verdict.
    pub fn status_line(&self) -> String {
        format!(
            "Input strategy for {} is {}!",
            self.goal,
            self.verdict.as_str()
        )
    }
}

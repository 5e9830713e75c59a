use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::VerifyError;
use crate::state::Classification;

/// Environment variable consulted when no mode is given on the command line.
pub const MODE_ENV: &str = "AVL_CERT_MODE";

pub const USAGE: &str = "the mode should be one of: insertion, i, deletion, d";

/// Operation the strategy claims to rebalance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Insertion,
    Deletion,
}

impl Goal {
    pub fn as_str(self) -> &'static str {
        match self {
            Goal::Insertion => "insertion",
            Goal::Deletion => "deletion",
        }
    }

    /// Height shift that sends a node to the OTHER outcome.
    pub fn other_delta(self) -> i32 {
        match self {
            Goal::Insertion => -1,
            Goal::Deletion => 1,
        }
    }
}

impl FromStr for Goal {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insertion" | "i" => Ok(Goal::Insertion),
            "deletion" | "d" => Ok(Goal::Deletion),
            other => Err(VerifyError::Config(format!(
                "unknown mode `{}`: {}",
                other, USAGE
            ))),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable per-run settings shared by every validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    pub goal: Goal,
}

impl VerifierConfig {
    pub const BEST: i32 = 0;

    pub fn new(goal: Goal) -> Self {
        Self { goal }
    }

    /// Resolve the mode from the CLI value, falling back to [`MODE_ENV`].
    pub fn from_cli_and_env(mode: Option<&str>) -> Result<Self, VerifyError> {
        Self::from_sources(mode, std::env::var(MODE_ENV).ok().as_deref())
    }

    pub(crate) fn from_sources(cli: Option<&str>, env: Option<&str>) -> Result<Self, VerifyError> {
        let raw = cli
            .or(env)
            .ok_or_else(|| VerifyError::Config(format!("no mode given: {}", USAGE)))?;
        raw.parse::<Goal>().map(Self::new)
    }

    pub fn other(&self) -> i32 {
        self.goal.other_delta()
    }

    /// Numeric value a classification takes in this run.
    pub fn value_of(&self, class: Classification) -> i32 {
        match class {
            Classification::Best => Self::BEST,
            Classification::Other => self.other(),
        }
    }

    /// Inverse of [`Self::value_of`]; `None` for values that are neither
    /// BEST nor this run's OTHER.
    pub fn classify(&self, value: i64) -> Option<Classification> {
        if value == i64::from(Self::BEST) {
            Some(Classification::Best)
        } else if value == i64::from(self.other()) {
            Some(Classification::Other)
        } else {
            None
        }
    }

    /// Stable hash of this configuration, recorded in reports.
    pub fn compute_hash(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        format!("{:x}", hasher.finalize())
    }
}

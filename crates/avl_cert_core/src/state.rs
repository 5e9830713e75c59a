use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vector::HeightVector;

/// Terminal outcome a vector is driven toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Best,
    Other,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Best => "best",
            Classification::Other => "other",
        }
    }
}

/// Tags appended to a vector to form a game state.
///
/// `Classified` stands for the `(target, SENTINEL)` pair: the sentinel is
/// never a valid position, so a classified state can not collide with a
/// marked one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StateTag {
    Marked { position: usize },
    Classified { target: Classification },
}

/// Identity of a game state for the closure check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey {
    pub heights: HeightVector,
    pub tag: StateTag,
}

impl StateKey {
    pub fn marked(heights: HeightVector, position: usize) -> Self {
        Self {
            heights,
            tag: StateTag::Marked { position },
        }
    }

    pub fn classified(heights: HeightVector, target: Classification) -> Self {
        Self {
            heights,
            tag: StateTag::Classified { target },
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            StateTag::Marked { position } => write!(f, "{}:{}", self.heights, position),
            StateTag::Classified { target } => {
                write!(f, "{}:{}:*", self.heights, target.as_str())
            }
        }
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::errors::CodecError;

/// Heights of the nodes of one tree level, left to right.
///
/// A negative entry coming from the textual form is a marked entry. The
/// vector is never mutated in place; the algebra in [`crate::algebra`]
/// always builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeightVector(Vec<i32>);

impl HeightVector {
    pub fn new(values: Vec<i32>) -> Self {
        Self(values)
    }

    pub fn parse(text: &str) -> Result<Self, CodecError> {
        codec::decode(text).map(Self)
    }

    pub fn values(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<i32> {
        self.0.get(index).copied()
    }

    /// Textual form, or `None` if some entry is outside `-9..=9`.
    pub fn encode(&self) -> Option<String> {
        codec::encode(&self.0)
    }
}

impl From<Vec<i32>> for HeightVector {
    fn from(values: Vec<i32>) -> Self {
        Self(values)
    }
}

impl FromStr for HeightVector {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HeightVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.encode() {
            Some(text) => write!(f, "{}", text),
            None => {
                write!(f, "[")?;
                for (i, value) in self.0.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}

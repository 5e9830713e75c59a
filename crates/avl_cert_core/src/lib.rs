//! Certificate checker for AVL rebalancing strategies.
//!
//! A certificate is a transcript of `E` (expand), `T` (terminalize) and `M`
//! (merge) moves over height vectors. Each line is checked against the
//! rewrite rule of its phase, and the run is valid when every state a move
//! relies on is derived by some other move and vice versa, up to the three
//! boundary states seeded by [`Verifier::new`].

pub mod algebra;
pub mod codec;
mod config;
mod errors;
mod moves;
mod phases;
mod reconcile;
mod report;
mod state;
mod transcript;
mod vector;


pub use config::{Goal, VerifierConfig, MODE_ENV, USAGE};
pub use errors::{CodecError, ErrorKind, VerifyError};
pub use moves::{
    parse_line, ExpandMove, MergeMove, Move, MoveKind, Reply, TerminalizeMove, FIELD_SEPARATOR,
    GROUP_SEPARATOR,
};
pub use phases::{check_move, Effects, UP};
pub use reconcile::{MoveStats, Unmatched, Verifier};
pub use report::{VerificationReport, Verdict, REPORT_SCHEMA_ID};
pub use state::{Classification, StateKey, StateTag};
pub use transcript::{build_report, feed, verify_reader, verify_str, TranscriptDigest};
pub use vector::HeightVector;

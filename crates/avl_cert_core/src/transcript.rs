use std::io::BufRead;

use sha2::{Digest, Sha256};
use tracing::info;

use crate::config::VerifierConfig;
use crate::errors::VerifyError;
use crate::reconcile::Verifier;
use crate::report::{VerificationReport, Verdict, REPORT_SCHEMA_ID};

/// What the driver saw of the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptDigest {
    pub lines_total: usize,
    pub sha256: String,
}

/// Feed every line of `reader` to `verifier`, stopping at the first error.
pub fn feed<R: BufRead>(verifier: &mut Verifier, mut reader: R) -> Result<TranscriptDigest, VerifyError> {
    let mut hasher = Sha256::new();
    let mut buf = String::new();
    let mut line = 0usize;
    loop {
        buf.clear();
        let read = reader
            .read_line(&mut buf)
            .map_err(|source| VerifyError::Io { line, source })?;
        if read == 0 {
            break;
        }
        line += 1;
        hasher.update(buf.as_bytes());
        let text = buf.trim_end_matches(['\n', '\r']);
        verifier.check_line(line, text)?;
    }
    Ok(TranscriptDigest {
        lines_total: line,
        sha256: format!("{:x}", hasher.finalize()),
    })
}

/// Verify a whole transcript and summarize the run.
pub fn verify_reader<R: BufRead>(
    config: VerifierConfig,
    reader: R,
) -> Result<VerificationReport, VerifyError> {
    let mut verifier = Verifier::new(config);
    let digest = feed(&mut verifier, reader)?;
    info!(
        lines = digest.lines_total,
        sha256 = %digest.sha256,
        "transcript consumed"
    );
    Ok(build_report(&verifier, &digest))
}

pub fn verify_str(config: VerifierConfig, transcript: &str) -> Result<VerificationReport, VerifyError> {
    verify_reader(config, transcript.as_bytes())
}

pub fn build_report(verifier: &Verifier, digest: &TranscriptDigest) -> VerificationReport {
    let closed = verifier.reconcile();
    let unmatched = verifier.unmatched();
    VerificationReport {
        schema_id: REPORT_SCHEMA_ID.to_string(),
        goal: verifier.config().goal,
        verdict: if closed {
            Verdict::Valid
        } else {
            Verdict::Invalid
        },
        config_hash: verifier.config().compute_hash(),
        transcript_sha256: digest.sha256.clone(),
        lines_total: digest.lines_total,
        moves: verifier.stats(),
        read_states: verifier.reads().len(),
        write_states: verifier.writes().len(),
        underived: unmatched.underived,
        unconsumed: unmatched.unconsumed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Goal;
    use crate::errors::ErrorKind;

    #[test]
    fn empty_transcript_is_invalid() {
        let report = verify_str(VerifierConfig::new(Goal::Deletion), "").expect("no fatal error");
        assert_eq!(report.verdict, Verdict::Invalid);
        assert_eq!(report.lines_total, 0);
        assert_eq!(report.read_states, 1);
        assert_eq!(report.write_states, 2);
        assert_eq!(report.unconsumed.len(), 1);
        assert_eq!(report.underived.len(), 2);
    }

    #[test]
    fn errors_carry_one_based_line_numbers() {
        let transcript = "E\t0:0:0\t11:0\t11:1\t12:0\t12:1\t21:0\t21:1\n\nQ\tjunk\n";
        let err = verify_str(VerifierConfig::new(Goal::Insertion), transcript)
            .expect_err("unknown tag on line 3");
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let transcript = "T\t11:0:0\t11:0\t21:0\r\nM\t11:0:0\t0:0\r\n";
        let report = verify_str(VerifierConfig::new(Goal::Deletion), transcript).expect("valid lines");
        assert_eq!(report.lines_total, 2);
        assert_eq!(report.moves.terminalize, 1);
        assert_eq!(report.moves.merge, 1);
    }

    #[test]
    fn digest_covers_raw_bytes() {
        let config = VerifierConfig::new(Goal::Deletion);
        let a = verify_str(config, "M\t11:0:0\t0:0\n").expect("valid");
        let b = verify_str(config, "M\t11:0:0\t0:0\n\n").expect("valid");
        assert_eq!(a.transcript_sha256.len(), 64);
        assert_ne!(a.transcript_sha256, b.transcript_sha256);
        assert_eq!(a.verdict, b.verdict);
    }
}

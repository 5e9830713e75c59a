use thiserror::Error;

/// Fatal failure of a verification run.
///
/// Line-level variants carry the 1-based line number of the first offending
/// transcript line. A transcript that parses cleanly but does not close is not
/// an error; it is reported through [`crate::Verdict::Invalid`].
#[derive(Debug, Error)]
pub enum VerifyError {
    /// A sub-field does not follow the height-vector or integer grammar.
    #[error("syntax error @ line {line}, field {field}: {message}")]
    Syntax {
        line: usize,
        field: usize,
        message: String,
    },

    /// Wrong field count, unknown tag, out-of-range index or bad target.
    #[error("structural error @ line {line}: {message}")]
    Structural { line: usize, message: String },

    /// A declared successor differs from the one computed from the source.
    #[error("consistency error @ line {line}: {message}")]
    Consistency { line: usize, message: String },

    /// Run mode or other configuration could not be resolved.
    #[error("configuration error: {0}")]
    Config(String),

    /// The transcript stream failed while reading.
    #[error("I/O error after line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of a [`VerifyError`], used by callers that only
/// care about which family of check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Structural,
    Consistency,
    Config,
    Io,
}

impl VerifyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VerifyError::Syntax { .. } => ErrorKind::Syntax,
            VerifyError::Structural { .. } => ErrorKind::Structural,
            VerifyError::Consistency { .. } => ErrorKind::Consistency,
            VerifyError::Config(_) => ErrorKind::Config,
            VerifyError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Line the error is attached to, if it came from the transcript.
    pub fn line(&self) -> Option<usize> {
        match self {
            VerifyError::Syntax { line, .. }
            | VerifyError::Structural { line, .. }
            | VerifyError::Consistency { line, .. }
            | VerifyError::Io { line, .. } => Some(*line),
            VerifyError::Config(_) => None,
        }
    }

    pub(crate) fn structural(line: usize, message: impl Into<String>) -> Self {
        VerifyError::Structural {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn consistency(line: usize, message: impl Into<String>) -> Self {
        VerifyError::Consistency {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn syntax(line: usize, field: usize, message: impl Into<String>) -> Self {
        VerifyError::Syntax {
            line,
            field,
            message: message.into(),
        }
    }
}

/// Rejection of a string by the height-vector grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("string `{text}` does not represent a height vector (offset {offset})")]
pub struct CodecError {
    pub text: String,
    pub offset: usize,
}

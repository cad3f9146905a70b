//! Failure taxonomy for a trigger run and its mapping onto process exit codes.

use std::error::Error as _;

use thiserror::Error;

/// Everything that can stop a trigger run after startup.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// A required argument or setting is missing or malformed.
    #[error("validation error: {0}")]
    Validation(String),
    /// The vectorization service could not be reached.
    #[error("could not reach {endpoint}: {}", error_chain(.source))]
    Connection {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with a non-2xx status.
    #[error("vectorization service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

impl TriggerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Process exit code reported for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Connection { .. } => 3,
            Self::Http { .. } => 4,
        }
    }
}

/// Flatten a reqwest error and its causes into one line.
///
/// reqwest's own `Display` stops at "error sending request", which hides the
/// refused connection or DNS failure underneath.
pub fn error_chain(err: &reqwest::Error) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        let text = inner.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        cause = inner.source();
    }
    out
}

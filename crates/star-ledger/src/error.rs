//! Error types for the ledger.

use star_ledger_core::CoreError;
use thiserror::Error;

use crate::chain::ChainDefect;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Payload or block state could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] CoreError),

    /// The ownership challenge is older than the submission window.
    #[error("submission window expired: message is {elapsed_secs}s old, window is {window_secs}s")]
    TimeWindowExpired { elapsed_secs: i64, window_secs: u64 },

    /// The signature over the ownership challenge did not verify.
    #[error("signature verification failed")]
    SignatureInvalid,

    /// The ownership challenge does not have the expected shape.
    #[error("malformed ownership message: {0}")]
    MalformedMessage(String),

    /// A star submission failed. The cause is kept as the error source.
    #[error("submission failed")]
    SubmissionFailed(#[source] Box<LedgerError>),

    /// The chain could not be traversed.
    #[error("could not validate chain")]
    ChainValidation(#[source] CoreError),

    /// The chain already holds defects, so it will not be extended.
    #[error("chain is corrupted ({} defects), refusing to admit block", .defects.len())]
    ChainCorrupted { defects: Vec<ChainDefect> },
}

impl LedgerError {
    /// The underlying cause of a failed submission, or the error itself.
    pub fn cause(&self) -> &LedgerError {
        match self {
            LedgerError::SubmissionFailed(inner) => inner.cause(),
            other => other,
        }
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

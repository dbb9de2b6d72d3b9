//! Error types for the star ledger core.

use thiserror::Error;

/// Core errors that can occur while building, hashing or decoding blocks.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("malformed hex: {0}")]
    MalformedHex(#[from] hex::FromHexError),
}

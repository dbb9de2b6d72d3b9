//! Identifiers shared across the ledger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The hash that identifies a block and links its successor to it.
///
/// It is the Blake3 digest of the block's canonical bytes, which cover
/// height, time, body and the previous block's hash but never the block's
/// own hash. A block's stored hash goes stale as soon as any covered field
/// changes, which is how tampering is detected.
///
/// `Display` prints all 64 hex digits, which is the form lookups take.
/// `Debug` keeps only the first 16 so defect reports stay readable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockHash(pub [u8; 32]);

impl BlockHash {
    /// Hash a block's canonical bytes.
    pub fn digest(canonical: &[u8]) -> Self {
        Self(*blake3::hash(canonical).as_bytes())
    }

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse the 64-digit form produced by `Display`.
    ///
    /// Any other length is rejected, so a truncated `Debug` rendering never
    /// resolves to a block.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes: [u8; 32] = hex::decode(s)?
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

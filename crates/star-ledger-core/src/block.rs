//! Block: one record of the ledger.
//!
//! A block is created holding only its encoded payload. The chain that
//! admits it fills in height, time and the link to its predecessor, then
//! seals it with its hash. After admission a block is never edited.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canonical::canonical_block_bytes;
use crate::codec;
use crate::error::CoreError;
use crate::types::BlockHash;

/// Payload carried by the genesis block.
pub const GENESIS_PAYLOAD: &str = "Genesis Block";

/// A ledger record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Digest of the block state; `None` until the block is sealed.
    pub hash: Option<BlockHash>,

    /// Position in the chain (0 is the genesis block).
    pub height: u64,

    /// Encoded payload (see [`codec`]).
    pub body: String,

    /// Admission time (Unix milliseconds).
    pub time: i64,

    /// Hash of the block at `height - 1` (`None` for genesis).
    pub previous_block_hash: Option<BlockHash>,
}

impl Block {
    /// Create an unsealed block carrying `data`.
    pub fn new<T: Serialize + ?Sized>(data: &T) -> Result<Self, CoreError> {
        Ok(Self {
            hash: None,
            height: 0,
            body: codec::encode(data)?,
            time: 0,
            previous_block_hash: None,
        })
    }

    /// Compute the digest of the block's current state.
    pub fn compute_hash(&self) -> Result<BlockHash, CoreError> {
        let bytes = canonical_block_bytes(self)?;
        Ok(BlockHash::digest(&bytes))
    }

    /// Compute and store the block hash.
    pub fn seal(&mut self) -> Result<BlockHash, CoreError> {
        let hash = self.compute_hash()?;
        self.hash = Some(hash);
        Ok(hash)
    }

    /// Check that the stored hash still matches the block's state.
    ///
    /// The stored hash is left untouched; an unsealed block is never valid.
    pub fn validate(&self) -> Result<bool, CoreError> {
        let candidate = self.compute_hash()?;
        Ok(self.hash == Some(candidate))
    }

    /// Check if this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }

    /// Decode the block payload.
    pub fn data(&self) -> Result<BlockData, CoreError> {
        if self.is_genesis() {
            return Ok(BlockData::Genesis);
        }
        codec::decode(&self.body).map(BlockData::Payload)
    }
}

/// A decoded block payload.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockData {
    /// The genesis block, whose payload is not application data.
    Genesis,

    /// Application data.
    Payload(Value),
}

impl BlockData {
    pub fn is_genesis(&self) -> bool {
        matches!(self, BlockData::Genesis)
    }

    /// Get the application payload, if any.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            BlockData::Genesis => None,
            BlockData::Payload(value) => Some(value),
        }
    }

    /// Get the `owner` field of an object payload.
    pub fn owner(&self) -> Option<&str> {
        self.payload()?.get("owner")?.as_str()
    }
}

/// The payload of a star block: a star claimed by a wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Wallet address of the owner.
    pub owner: String,

    /// The star description, opaque to the ledger.
    pub star: Value,
}

impl StarRecord {
    pub fn new(owner: impl Into<String>, star: Value) -> Self {
        Self {
            owner: owner.into(),
            star,
        }
    }
}

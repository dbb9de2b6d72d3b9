//! # Star Ledger Core
//!
//! Pure primitives for the star ledger: blocks, block hashes, the payload
//! codec and the wallet keys used to sign ownership challenges.
//!
//! This crate contains no I/O, no clocks, no locking. It is pure computation
//! over hash-linked records.
//!
//! ## Key Types
//!
//! - [`Block`] - One ledger record: encoded payload, height, time, links
//! - [`BlockHash`] - Content digest of a block (Blake3)
//! - [`BlockData`] - Decoded payload, with a sentinel for the genesis block
//! - [`StarRecord`] - The owner-tagged payload admitted by star submission
//!
//! ## Hashing
//!
//! Block state is hashed over deterministic CBOR. See [`canonical`] module.

pub mod block;
pub mod canonical;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod types;

pub use block::{Block, BlockData, StarRecord, GENESIS_PAYLOAD};
pub use canonical::canonical_block_bytes;
pub use codec::{decode, encode};
pub use crypto::{Keypair, PublicKey, Signature};
pub use error::CoreError;
pub use types::BlockHash;

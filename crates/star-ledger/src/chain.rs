//! The Chain: an ordered, append-only sequence of hash-linked blocks.
//!
//! The chain is the only place blocks are sealed. Admission assigns height,
//! time and the link to the current tip, computes the hash, and refuses to
//! extend a chain that no longer validates.

use std::fmt;

use serde_json::Value;
use star_ledger_core::{Block, BlockData, BlockHash, CoreError, StarRecord};

use crate::clock::Clock;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::verify::SignatureVerifier;

/// A defect found while validating the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainDefect {
    /// A block does not point at the hash of its predecessor.
    BrokenLink {
        height: u64,
        observed: Option<BlockHash>,
        expected: Option<BlockHash>,
    },

    /// A block's contents no longer match its stored hash.
    Tampered {
        height: u64,
        hash: Option<BlockHash>,
    },

    /// A block's stored height differs from its position in the chain.
    HeightMismatch { height: u64, stored: u64 },
}

impl ChainDefect {
    /// Position of the defective block in the chain.
    pub fn height(&self) -> u64 {
        match self {
            ChainDefect::BrokenLink { height, .. }
            | ChainDefect::Tampered { height, .. }
            | ChainDefect::HeightMismatch { height, .. } => *height,
        }
    }
}

impl fmt::Display for ChainDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainDefect::BrokenLink {
                height,
                observed,
                expected,
            } => write!(
                f,
                "block {}: previous block hash {} does not match hash {} of block {}",
                height,
                display_hash(observed),
                display_hash(expected),
                height.saturating_sub(1)
            ),
            ChainDefect::Tampered { height, hash } => write!(
                f,
                "block {}: contents do not match stored hash {}",
                height,
                display_hash(hash)
            ),
            ChainDefect::HeightMismatch { height, stored } => {
                write!(f, "block {}: stored height is {}", height, stored)
            }
        }
    }
}

fn display_hash(hash: &Option<BlockHash>) -> String {
    match hash {
        Some(h) => h.to_hex(),
        None => "<none>".to_string(),
    }
}

/// The ledger.
///
/// Owns every block it has admitted. Blocks are only ever appended; the
/// block at index `i` always has height `i`.
pub struct Chain<V, C> {
    blocks: Vec<Block>,
    config: LedgerConfig,
    verifier: V,
    clock: C,
}

impl<V: SignatureVerifier, C: Clock> Chain<V, C> {
    /// Create a chain holding its genesis block.
    pub fn new(config: LedgerConfig, verifier: V, clock: C) -> Result<Self> {
        let mut chain = Self::empty(config, verifier, clock);
        chain.initialize()?;
        Ok(chain)
    }

    /// Create a chain with no blocks at all.
    pub fn empty(config: LedgerConfig, verifier: V, clock: C) -> Self {
        Self {
            blocks: Vec::new(),
            config,
            verifier,
            clock,
        }
    }

    /// Admit the genesis block if the chain has none yet.
    pub fn initialize(&mut self) -> Result<()> {
        if self.height().is_some() {
            return Ok(());
        }

        let genesis = Block::new(&self.config.genesis_payload)?;
        let genesis = self.admit(genesis)?;
        tracing::info!("Genesis block created: {}", display_hash(&genesis.hash));
        Ok(())
    }

    /// Height of the tip, or `None` before genesis.
    pub fn height(&self) -> Option<u64> {
        (self.blocks.len() as u64).checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks in height order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[cfg(test)]
    pub(crate) fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    /// The most recently admitted block.
    pub fn tip(&self) -> Option<&Block> {
        self.blocks.last()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Admission
    // ─────────────────────────────────────────────────────────────────────────

    /// Seal `block` on top of the current tip and append it.
    ///
    /// The existing chain is validated first; a chain with defects is never
    /// extended.
    pub(crate) fn admit(&mut self, mut block: Block) -> Result<Block> {
        block.height = self.blocks.len() as u64;
        block.time = self.clock.now_millis();
        block.previous_block_hash = self.tip().and_then(|tip| tip.hash);
        block.seal()?;

        if self.config.validate_before_admit {
            let defects = self.validate_chain()?;
            if !defects.is_empty() {
                tracing::warn!(
                    "Refusing block at height {}: chain has {} defects",
                    block.height,
                    defects.len()
                );
                return Err(LedgerError::ChainCorrupted { defects });
            }
        }

        tracing::debug!(
            "Admitted block {} at height {}",
            display_hash(&block.hash),
            block.height
        );
        self.blocks.push(block.clone());
        Ok(block)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Star Submission
    // ─────────────────────────────────────────────────────────────────────────

    /// Build the challenge a wallet signs to prove ownership.
    ///
    /// Format: `{address}:{unix_seconds}:{tag}`.
    pub fn request_message_ownership_verification(&self, address: &str) -> String {
        format!(
            "{}:{}:{}",
            address,
            self.clock.now_secs(),
            self.config.message_tag
        )
    }

    /// Admit a star owned by `address`, proven by a signed challenge.
    ///
    /// Fails with [`LedgerError::SubmissionFailed`] whatever the cause; use
    /// [`LedgerError::cause`] to inspect it.
    pub fn submit_star(
        &mut self,
        address: &str,
        message: &str,
        signature: &str,
        star: Value,
    ) -> Result<Block> {
        self.try_submit_star(address, message, signature, star)
            .map_err(|e| {
                tracing::warn!("Star submission from {} rejected: {}", address, e);
                LedgerError::SubmissionFailed(Box::new(e))
            })
    }

    fn try_submit_star(
        &mut self,
        address: &str,
        message: &str,
        signature: &str,
        star: Value,
    ) -> Result<Block> {
        let message_secs = parse_message_time(message)?;
        let elapsed_secs = self.clock.now_secs().saturating_sub(message_secs);
        let window_secs = self.config.submission_window.as_secs();

        if elapsed_secs >= i64::try_from(window_secs).unwrap_or(i64::MAX) {
            return Err(LedgerError::TimeWindowExpired {
                elapsed_secs,
                window_secs,
            });
        }

        if !self.verifier.verify(message, address, signature) {
            return Err(LedgerError::SignatureInvalid);
        }

        let block = Block::new(&StarRecord::new(address, star))?;
        self.admit(block)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// All blocks with the given hash.
    pub fn block_by_hash(&self, hash: &BlockHash) -> Vec<&Block> {
        self.blocks
            .iter()
            .filter(|block| block.hash.as_ref() == Some(hash))
            .collect()
    }

    /// The block at the given height.
    pub fn block_by_height(&self, height: u64) -> Option<&Block> {
        self.blocks.iter().find(|block| block.height == height)
    }

    /// Stars owned by `address`, in chain order.
    pub fn stars_by_wallet_address(&self, address: &str) -> Result<Vec<StarRecord>> {
        self.owned_by(address)
            .map(|entry| entry.map(|(_, star)| star))
            .collect()
    }

    /// Blocks holding stars owned by `address`, in chain order.
    pub fn star_blocks_by_wallet_address(&self, address: &str) -> Result<Vec<&Block>> {
        self.owned_by(address)
            .map(|entry| entry.map(|(block, _)| block))
            .collect()
    }

    fn owned_by<'a, 'b>(
        &'a self,
        address: &'b str,
    ) -> impl Iterator<Item = Result<(&'a Block, StarRecord)>> + 'b
    where
        'a: 'b,
    {
        self.blocks.iter().filter_map(move |block| match block.data() {
            Err(e) => Some(Err(LedgerError::from(e))),
            Ok(data) if data.owner() == Some(address) => {
                Some(star_record(data).map(|star| (block, star)))
            }
            Ok(_) => None,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Check every block for altered contents or a misplaced height, and
    /// every block after genesis for a broken link.
    ///
    /// Defects name the block's position in the chain and are returned as
    /// data; an empty list means the chain is valid.
    pub fn validate_chain(&self) -> Result<Vec<ChainDefect>> {
        let mut defects = Vec::new();

        for (index, block) in self.blocks.iter().enumerate() {
            let height = index as u64;

            if block.height != height {
                defects.push(ChainDefect::HeightMismatch {
                    height,
                    stored: block.height,
                });
            }

            if let Some(previous) = index.checked_sub(1).map(|i| &self.blocks[i]) {
                if block.previous_block_hash != previous.hash {
                    defects.push(ChainDefect::BrokenLink {
                        height,
                        observed: block.previous_block_hash,
                        expected: previous.hash,
                    });
                }
            }

            if !block.validate().map_err(LedgerError::ChainValidation)? {
                defects.push(ChainDefect::Tampered {
                    height,
                    hash: block.hash,
                });
            }
        }

        for defect in &defects {
            tracing::warn!("Chain defect: {}", defect);
        }
        Ok(defects)
    }

    /// Fail with [`LedgerError::ChainCorrupted`] if the chain has defects.
    pub fn verify_chain_integrity(&self) -> Result<()> {
        let defects = self.validate_chain()?;
        if defects.is_empty() {
            Ok(())
        } else {
            Err(LedgerError::ChainCorrupted { defects })
        }
    }
}

/// Extract the timestamp (second `:`-separated field) of a challenge.
fn parse_message_time(message: &str) -> Result<i64> {
    let field = message
        .split(':')
        .nth(1)
        .ok_or_else(|| LedgerError::MalformedMessage("missing timestamp field".into()))?;

    field
        .trim()
        .parse::<i64>()
        .map_err(|_| LedgerError::MalformedMessage(format!("invalid timestamp {:?}", field)))
}

fn star_record(data: BlockData) -> Result<StarRecord> {
    match data {
        BlockData::Payload(value) => serde_json::from_value(value)
            .map_err(|e| LedgerError::Serialization(CoreError::Decoding(e.to_string()))),
        BlockData::Genesis => Err(LedgerError::Serialization(CoreError::Decoding(
            "genesis block holds no star".into(),
        ))),
    }
}

//! StarRegistry: the shared, async entry point to a chain.
//!
//! The chain sits behind a read-write lock. Submissions hold the write lock
//! for the whole gated admission, so there is only ever one writer and the
//! height assigned to a block cannot race with another admission.

use serde_json::Value;
use tokio::sync::RwLock;

use star_ledger_core::{Block, BlockHash, StarRecord};

use crate::chain::{Chain, ChainDefect};
use crate::clock::Clock;
use crate::config::LedgerConfig;
use crate::error::Result;
use crate::verify::SignatureVerifier;

/// The public surface of the ledger.
pub struct StarRegistry<V, C> {
    chain: RwLock<Chain<V, C>>,
}

impl<V: SignatureVerifier, C: Clock> StarRegistry<V, C> {
    /// Create a registry over a fresh chain.
    pub fn new(config: LedgerConfig, verifier: V, clock: C) -> Result<Self> {
        Ok(Self::from_chain(Chain::new(config, verifier, clock)?))
    }

    /// Wrap an existing chain.
    pub fn from_chain(chain: Chain<V, C>) -> Self {
        Self {
            chain: RwLock::new(chain),
        }
    }

    pub async fn chain_height(&self) -> Option<u64> {
        self.chain.read().await.height()
    }

    pub async fn request_message_ownership_verification(&self, address: &str) -> String {
        self.chain
            .read()
            .await
            .request_message_ownership_verification(address)
    }

    pub async fn submit_star(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        star: Value,
    ) -> Result<Block> {
        self.chain
            .write()
            .await
            .submit_star(address, message, signature, star)
    }

    pub async fn block_by_hash(&self, hash: &BlockHash) -> Vec<Block> {
        self.chain
            .read()
            .await
            .block_by_hash(hash)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn block_by_height(&self, height: u64) -> Option<Block> {
        self.chain.read().await.block_by_height(height).cloned()
    }

    pub async fn stars_by_wallet_address(&self, address: &str) -> Result<Vec<StarRecord>> {
        self.chain.read().await.stars_by_wallet_address(address)
    }

    /// Blocks carrying stars owned by `address`, in chain order.
    pub async fn star_blocks_by_wallet_address(&self, address: &str) -> Result<Vec<Block>> {
        let chain = self.chain.read().await;
        let blocks = chain.star_blocks_by_wallet_address(address)?;
        Ok(blocks.into_iter().cloned().collect())
    }

    pub async fn validate_chain(&self) -> Result<Vec<ChainDefect>> {
        self.chain.read().await.validate_chain()
    }

    /// Health check: fails with the chain's defects if any are found.
    pub async fn verify_chain_integrity(&self) -> Result<()> {
        self.chain.read().await.verify_chain_integrity()
    }

    /// Run a read-only query against the chain.
    pub async fn read<R>(&self, query: impl FnOnce(&Chain<V, C>) -> R) -> R {
        let chain = self.chain.read().await;
        query(&*chain)
    }
}

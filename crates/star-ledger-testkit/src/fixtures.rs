//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use star_ledger::{Block, Chain, Clock, Ed25519Verifier, LedgerConfig, Result};
use star_ledger_core::Keypair;

/// A fixed starting time for fixtures (2025-01-14T16:00:00Z).
pub const T0_MILLIS: i64 = 1_736_870_400_000;

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn at(millis: i64) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(millis)),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        self.millis.fetch_add(secs * 1000, Ordering::SeqCst);
    }

    pub fn set_millis(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::at(T0_MILLIS)
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// An Ed25519 wallet.
#[derive(Debug, Clone)]
pub struct Wallet {
    pub keypair: Keypair,
}

impl Wallet {
    pub fn generate() -> Self {
        Self {
            keypair: Keypair::generate(),
        }
    }

    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
        }
    }

    pub fn address(&self) -> String {
        self.keypair.address()
    }

    /// Sign a challenge, returning the hex signature.
    pub fn sign(&self, message: &str) -> String {
        self.keypair.sign_message(message).to_hex()
    }
}

/// Create deterministic wallets for multi-party tests.
pub fn wallets(count: usize) -> Vec<Wallet> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64).to_le_bytes());
            seed[8] = 0x5a;
            Wallet::from_seed(seed)
        })
        .collect()
}

/// A chain with real signature verification and a manual clock.
pub struct ChainFixture {
    pub chain: Chain<Ed25519Verifier, ManualClock>,
    pub clock: ManualClock,
}

impl ChainFixture {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        let clock = ManualClock::default();
        let chain = Chain::new(config, Ed25519Verifier, clock.clone())
            .expect("genesis admission on a fresh chain");
        Self { chain, clock }
    }

    /// Request a challenge, sign it and submit `star` right away.
    pub fn submit(&mut self, wallet: &Wallet, star: Value) -> Result<Block> {
        let address = wallet.address();
        let message = self.chain.request_message_ownership_verification(&address);
        let signature = wallet.sign(&message);
        self.chain.submit_star(&address, &message, &signature, star)
    }
}

impl Default for ChainFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::default();
        let other = clock.clone();
        clock.advance_secs(10);
        assert_eq!(other.now_millis(), T0_MILLIS + 10_000);

        other.set_millis(0);
        assert_eq!(clock.now_secs(), 0);
    }

    #[test]
    fn test_wallets_unique() {
        let parties = wallets(3);
        assert_ne!(parties[0].address(), parties[1].address());
        assert_ne!(parties[1].address(), parties[2].address());
        assert_eq!(wallets(1)[0].address(), parties[0].address());
    }

    #[test]
    fn test_wallets_unique_past_one_byte() {
        let parties = wallets(300);
        let addresses: HashSet<String> = parties.iter().map(Wallet::address).collect();
        assert_eq!(addresses.len(), 300);
    }

    #[test]
    fn test_fixture_submit() {
        let mut fixture = ChainFixture::new();
        let wallet = Wallet::from_seed([0x09; 32]);
        let block = fixture.submit(&wallet, json!({ "name": "Vega" })).unwrap();
        assert_eq!(block.height, 1);
        assert_eq!(fixture.chain.height(), Some(1));
    }
}

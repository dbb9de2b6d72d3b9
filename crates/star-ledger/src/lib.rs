//! # Star Ledger
//!
//! An in-memory, append-only ledger of hash-linked blocks, used as a star
//! registry: wallets claim stars by signing a short-lived ownership
//! challenge, and each accepted claim becomes a block.
//!
//! ## Overview
//!
//! - **Chain**: Owns the blocks. Seals new blocks onto the tip, validates
//!   links and contents, answers queries.
//! - **Star submission**: A challenge `{address}:{unix_seconds}:starRegistry`
//!   is signed by the wallet and must come back within five minutes.
//! - **StarRegistry**: Async, lock-guarded access to a chain with a single
//!   writer.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use star_ledger::{Ed25519Verifier, LedgerConfig, StarRegistry, SystemClock};
//! use star_ledger::core::Keypair;
//!
//! async fn example() {
//!     let registry =
//!         StarRegistry::new(LedgerConfig::default(), Ed25519Verifier, SystemClock).unwrap();
//!
//!     let wallet = Keypair::generate();
//!     let message = registry
//!         .request_message_ownership_verification(&wallet.address())
//!         .await;
//!     let signature = wallet.sign_message(&message).to_hex();
//!
//!     let block = registry
//!         .submit_star(
//!             &wallet.address(),
//!             &message,
//!             &signature,
//!             serde_json::json!({ "ra": "16h 29m 1.0s", "dec": "68° 52' 56.9" }),
//!         )
//!         .await
//!         .unwrap();
//!     assert_eq!(block.height, 1);
//! }
//! ```

pub mod chain;
pub mod clock;
pub mod config;
pub mod error;
pub mod registry;
pub mod verify;

pub use star_ledger_core as core;

pub use chain::{Chain, ChainDefect};
pub use clock::{Clock, SystemClock};
pub use config::LedgerConfig;
pub use error::{LedgerError, Result};
pub use registry::StarRegistry;
pub use verify::{Ed25519Verifier, SignatureVerifier};

pub use star_ledger_core::{Block, BlockData, BlockHash, StarRecord};

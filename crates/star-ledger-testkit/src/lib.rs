//! # Star Ledger Testkit
//!
//! Testing utilities for the star ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Wallets that sign challenges, a hand-driven clock, and a
//!   ready-made chain wired to real Ed25519 verification
//! - **Generators**: Proptest strategies for star payloads and wallets
//! - **Logging**: A one-call `tracing` subscriber for test output
//!
//! ## Test Fixtures
//!
//! ```rust
//! use star_ledger_testkit::fixtures::{ChainFixture, Wallet};
//!
//! let mut fixture = ChainFixture::new();
//! let wallet = Wallet::from_seed([0x01; 32]);
//! let block = fixture.submit(&wallet, serde_json::json!({ "name": "Polaris" })).unwrap();
//! assert_eq!(block.height, 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod logging;

pub use fixtures::{ChainFixture, ManualClock, Wallet, T0_MILLIS};
pub use generators::{star, wallet};
pub use logging::init_tracing;

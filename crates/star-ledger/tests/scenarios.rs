//! End-to-end star registry scenarios with real Ed25519 wallets.

use proptest::prelude::*;
use serde_json::{json, Value};

use star_ledger::core::codec;
use star_ledger::{BlockData, Ed25519Verifier, LedgerConfig, LedgerError, StarRegistry};
use star_ledger_testkit::fixtures::{wallets, ChainFixture, ManualClock, Wallet};
use star_ledger_testkit::{init_tracing, star, wallet, T0_MILLIS};

#[test]
fn test_star_accepted_within_window() {
    init_tracing();
    let mut fixture = ChainFixture::new();
    let wallet = Wallet::from_seed([0x11; 32]);
    let address = wallet.address();

    let message = fixture.chain.request_message_ownership_verification(&address);
    assert_eq!(message, format!("{}:{}:starRegistry", address, T0_MILLIS / 1000));
    let signature = wallet.sign(&message);

    fixture.clock.advance_secs(100);
    let prior_len = fixture.chain.len() as u64;
    let prior_tip = fixture.chain.tip().unwrap().hash;

    let star = json!({ "ra": "16h 29m 1.0s", "dec": "68° 52' 56.9", "story": "first light" });
    let block = fixture
        .chain
        .submit_star(&address, &message, &signature, star.clone())
        .unwrap();

    assert_eq!(block.height, prior_len);
    assert_eq!(block.previous_block_hash, prior_tip);
    assert_eq!(block.time, T0_MILLIS + 100_000);
    let body: Value = codec::decode(&block.body).unwrap();
    assert_eq!(body, json!({ "owner": address, "star": star }));
}

#[test]
fn test_star_rejected_after_window() {
    let mut fixture = ChainFixture::new();
    let wallet = Wallet::from_seed([0x12; 32]);
    let address = wallet.address();

    let message = fixture.chain.request_message_ownership_verification(&address);
    let signature = wallet.sign(&message);
    fixture.clock.advance_secs(301);

    let err = fixture
        .chain
        .submit_star(&address, &message, &signature, json!({}))
        .unwrap_err();
    assert_eq!(err.to_string(), "submission failed");
    assert!(matches!(err.cause(), LedgerError::TimeWindowExpired { .. }));
    assert_eq!(fixture.chain.height(), Some(0));
}

#[test]
fn test_forged_signature_rejected() {
    let mut fixture = ChainFixture::new();
    let owner = Wallet::from_seed([0x13; 32]);
    let forger = Wallet::from_seed([0x14; 32]);
    let address = owner.address();

    let message = fixture.chain.request_message_ownership_verification(&address);
    let forged = forger.sign(&message);

    let err = fixture
        .chain
        .submit_star(&address, &message, &forged, json!({}))
        .unwrap_err();
    assert!(matches!(err.cause(), LedgerError::SignatureInvalid));

    // A valid signature over a different challenge does not carry over.
    let other = format!("{}:{}:starRegistry", address, T0_MILLIS / 1000 - 1);
    let err = fixture
        .chain
        .submit_star(&address, &message, &owner.sign(&other), json!({}))
        .unwrap_err();
    assert!(matches!(err.cause(), LedgerError::SignatureInvalid));
    assert_eq!(fixture.chain.height(), Some(0));
}

#[test]
fn test_custom_window_and_tag() {
    let config = LedgerConfig::default()
        .submission_window(std::time::Duration::from_secs(30))
        .message_tag("constellation");
    let mut fixture = ChainFixture::with_config(config);
    let wallet = Wallet::from_seed([0x15; 32]);
    let address = wallet.address();

    let message = fixture.chain.request_message_ownership_verification(&address);
    assert!(message.ends_with(":constellation"));
    let signature = wallet.sign(&message);

    fixture.clock.advance_secs(30);
    let err = fixture
        .chain
        .submit_star(&address, &message, &signature, json!({}))
        .unwrap_err();
    assert!(matches!(
        err.cause(),
        LedgerError::TimeWindowExpired {
            elapsed_secs: 30,
            window_secs: 30
        }
    ));
}

#[test]
fn test_stars_by_wallet_address_in_order() {
    let mut fixture = ChainFixture::new();
    let parties = wallets(2);
    let (alice, bob) = (&parties[0], &parties[1]);

    for (i, owner) in [alice, bob, alice, alice, bob].into_iter().enumerate() {
        fixture.clock.advance_secs(1);
        fixture.submit(owner, json!({ "seq": i })).unwrap();
    }

    let stars = fixture.chain.stars_by_wallet_address(&alice.address()).unwrap();
    let seqs: Vec<_> = stars.iter().map(|s| s.star["seq"].as_u64().unwrap()).collect();
    assert_eq!(seqs, vec![0, 2, 3]);
    assert_eq!(
        fixture.chain.stars_by_wallet_address(&bob.address()).unwrap().len(),
        2
    );
}

#[test]
fn test_point_queries() {
    let mut fixture = ChainFixture::new();
    let wallet = Wallet::from_seed([0x16; 32]);
    let block = fixture.submit(&wallet, json!({ "name": "Deneb" })).unwrap();

    assert_eq!(fixture.chain.block_by_height(1), Some(&block));
    assert_eq!(fixture.chain.block_by_height(2), None);
    assert_eq!(fixture.chain.block_by_hash(&block.hash.unwrap()), vec![&block]);

    let genesis = fixture.chain.block_by_height(0).unwrap();
    assert_eq!(genesis.data().unwrap(), BlockData::Genesis);
}

#[tokio::test]
async fn test_registry_with_real_wallets() {
    init_tracing();
    let clock = ManualClock::default();
    let registry =
        StarRegistry::new(LedgerConfig::default(), Ed25519Verifier, clock.clone()).unwrap();
    let wallet = Wallet::from_seed([0x17; 32]);
    let address = wallet.address();

    let message = registry.request_message_ownership_verification(&address).await;
    clock.advance_secs(42);
    let block = registry
        .submit_star(&address, &message, &wallet.sign(&message), json!({ "name": "Altair" }))
        .await
        .unwrap();

    assert_eq!(registry.chain_height().await, Some(1));
    assert_eq!(
        registry.star_blocks_by_wallet_address(&address).await.unwrap(),
        vec![block.clone()]
    );
    assert_eq!(registry.block_by_hash(&block.hash.unwrap()).await, vec![block]);
    assert!(registry.validate_chain().await.unwrap().is_empty());
    registry.verify_chain_integrity().await.unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_valid_admissions_validate(
        claims in prop::collection::vec((wallet(), star(), 0i64..299), 1..12),
    ) {
        let mut fixture = ChainFixture::new();

        for (owner, description, delay) in &claims {
            let address = owner.address();
            let message = fixture.chain.request_message_ownership_verification(&address);
            fixture.clock.advance_secs(*delay);
            fixture
                .chain
                .submit_star(&address, &message, &owner.sign(&message), description.clone())
                .unwrap();
        }

        prop_assert_eq!(fixture.chain.len(), claims.len() + 1);
        prop_assert!(fixture.chain.validate_chain().unwrap().is_empty());

        let blocks = fixture.chain.blocks();
        for (i, block) in blocks.iter().enumerate() {
            prop_assert_eq!(block.height, i as u64);
            if i > 0 {
                prop_assert_eq!(block.previous_block_hash, blocks[i - 1].hash);
            }
        }
    }
}

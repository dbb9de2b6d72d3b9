//! Signature verification for ownership challenges.

use star_ledger_core::{PublicKey, Signature};

/// Verifies that `signature` over `message` was produced by `address`.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool;
}

/// Ed25519 wallets: hex public key addresses, hex 64-byte signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool {
        let (Ok(public_key), Ok(signature)) =
            (PublicKey::from_address(address), Signature::from_hex(signature))
        else {
            return false;
        };
        public_key.verify(message, &signature).is_ok()
    }
}

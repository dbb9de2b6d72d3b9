//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{json, Value};

use crate::fixtures::Wallet;

/// Generate a wallet from a random seed.
pub fn wallet() -> impl Strategy<Value = Wallet> {
    any::<[u8; 32]>().prop_map(Wallet::from_seed)
}

/// Generate a right ascension such as `16h 29m 1.0s`.
pub fn right_ascension() -> impl Strategy<Value = String> {
    (0u32..24, 0u32..60, 0u32..600)
        .prop_map(|(h, m, ds)| format!("{}h {}m {}.{}s", h, m, ds / 10, ds % 10))
}

/// Generate a declination such as `-26° 29' 24.9`.
pub fn declination() -> impl Strategy<Value = String> {
    (-89i32..=89, 0u32..60, 0u32..600)
        .prop_map(|(d, m, ds)| format!("{}° {}' {}.{}", d, m, ds / 10, ds % 10))
}

/// Generate a star description.
pub fn star() -> impl Strategy<Value = Value> {
    (
        right_ascension(),
        declination(),
        proptest::option::of(-2i32..20),
        "[A-Za-z ,.!']{0,120}",
    )
        .prop_map(|(ra, dec, mag, story)| match mag {
            Some(mag) => json!({ "ra": ra, "dec": dec, "mag": mag, "story": story }),
            None => json!({ "ra": ra, "dec": dec, "story": story }),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use star_ledger_core::{codec, StarRecord};

    proptest! {
        #[test]
        fn test_star_record_codec_roundtrip(owner in wallet(), description in star()) {
            let record = StarRecord::new(owner.address(), description);
            let token = codec::encode(&record).unwrap();
            let back: StarRecord = codec::decode(&token).unwrap();
            prop_assert_eq!(back, record);
        }

        #[test]
        fn test_star_has_coordinates(description in star()) {
            prop_assert!(description["ra"].as_str().unwrap().ends_with('s'));
            prop_assert!(description["dec"].as_str().unwrap().contains('°'));
        }
    }
}

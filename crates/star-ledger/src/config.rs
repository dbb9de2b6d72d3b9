//! Ledger configuration.

use std::time::Duration;

use star_ledger_core::GENESIS_PAYLOAD;

/// Configuration for a [`Chain`](crate::Chain).
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// How long an ownership challenge stays valid.
    pub submission_window: Duration,
    /// Suffix of ownership challenges (`{address}:{time}:{tag}`).
    pub message_tag: String,
    /// Whether admission checks the existing chain before extending it.
    pub validate_before_admit: bool,
    /// Payload stored in the genesis block.
    pub genesis_payload: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            submission_window: Duration::from_secs(300),
            message_tag: "starRegistry".to_string(),
            validate_before_admit: true,
            genesis_payload: GENESIS_PAYLOAD.to_string(),
        }
    }
}

impl LedgerConfig {
    pub fn submission_window(mut self, window: Duration) -> Self {
        self.submission_window = window;
        self
    }

    pub fn message_tag(mut self, tag: impl Into<String>) -> Self {
        self.message_tag = tag.into();
        self
    }

    pub fn validate_before_admit(mut self, enabled: bool) -> Self {
        self.validate_before_admit = enabled;
        self
    }

    pub fn genesis_payload(mut self, payload: impl Into<String>) -> Self {
        self.genesis_payload = payload.into();
        self
    }
}

use candid::Principal;
use serde::Deserialize;

use crate::ic::agent::IC_URL;

pub const MAKO_BACKEND: &str = if cfg!(any(feature = "local", feature = "staging")) {
    "l4lgk-raaaa-aaaar-qahpq-cai"
} else {
    "2ipq2-uqaaa-aaaar-qailq-cai"
};

/// Client tuning knobs. The polling cadence and the balance-refresh schedule
/// are empirical against observed ledger finality latency and are expected
/// to be overridden per deployment, not correctness requirements.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub ic_url: String,
    pub backend_canister_id: String,
    pub initial_polling_interval_ms: u64,
    pub fast_polling_interval_ms: u64,
    /// Elapsed monitoring time after which polling switches to the fast interval.
    pub fast_polling_delay_ms: u64,
    pub max_polling_attempts: u32,
    /// Offsets from swap success at which balances are re-read.
    pub balance_refresh_delays_ms: Vec<u64>,
    pub approval_expiry_ms: u64,
    /// Used when a ledger's icrc1_fee cannot be read; matches the most
    /// common ledger fee.
    pub fallback_ledger_fee: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            ic_url: IC_URL.to_string(),
            backend_canister_id: MAKO_BACKEND.to_string(),
            initial_polling_interval_ms: 500,
            fast_polling_interval_ms: 100,
            fast_polling_delay_ms: 5_000,
            max_polling_attempts: 200,
            balance_refresh_delays_ms: vec![1_000, 2_000, 3_000, 3_000, 3_000, 5_000],
            approval_expiry_ms: 29 * 24 * 60 * 60 * 1_000,
            fallback_ledger_fee: 10_000,
        }
    }
}

impl ClientSettings {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    pub fn backend_principal(&self) -> Result<Principal, String> {
        Principal::from_text(&self.backend_canister_id)
            .map_err(|e| format!("Invalid backend canister id {}: {}", self.backend_canister_id, e))
    }
}

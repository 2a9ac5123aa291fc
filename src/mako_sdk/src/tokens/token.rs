use candid::{CandidType, Nat, Principal};
use serde::{Deserialize, Serialize};

pub const IC_CHAIN: &str = "IC";

/// One IC token as published by the settlement backend's registry.
/// Immutable once loaded for the session.
#[derive(CandidType, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_id: u32,
    pub chain: String,
    pub name: String,
    pub symbol: String,
    pub canister_id: String,
    pub decimals: u8,
    pub fee: Nat,
    pub icrc1: bool,
    pub icrc2: bool,
    pub icrc3: bool,
    pub is_removed: bool,
    pub total_supply: Option<Nat>,
}

impl Token {
    pub fn ledger_id(&self) -> Result<Principal, String> {
        Principal::from_text(&self.canister_id).map_err(|e| format!("Invalid canister id {}: {}", self.canister_id, e))
    }

    pub fn address_with_chain(&self) -> String {
        format!("{}.{}", self.chain, self.canister_id)
    }

    pub fn is_icp(&self) -> bool {
        self.symbol == "ICP" || self.symbol == "icp"
    }
}

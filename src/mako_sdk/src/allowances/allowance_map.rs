use std::collections::HashMap;
use std::sync::Mutex;

use candid::Nat;

/// One observed ICRC2 approval. `observed_at_ms` is the local clock at the
/// time the approval was made or queried; approvals are set to expire about
/// 29 days out, so staleness is judged against that window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allowance {
    pub canister_id: String,
    pub owner: String,
    pub spender: String,
    pub amount: Nat,
    pub observed_at_ms: u64,
}

/// Unbounded (token, owner, spender) -> allowance cache, last-write-wins.
/// Consulted before issuing a fresh approval.
#[derive(Debug, Default)]
pub struct AllowanceMap {
    allowances: Mutex<HashMap<(String, String, String), Allowance>>,
}

impl AllowanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, canister_id: &str, owner: &str, spender: &str) -> Option<Allowance> {
        let allowances = self.allowances.lock().unwrap_or_else(|e| e.into_inner());
        allowances
            .get(&(canister_id.to_string(), owner.to_string(), spender.to_string()))
            .cloned()
    }

    pub fn insert(&self, allowance: Allowance) {
        let mut allowances = self.allowances.lock().unwrap_or_else(|e| e.into_inner());
        let key = (allowance.canister_id.clone(), allowance.owner.clone(), allowance.spender.clone());
        allowances.insert(key, allowance);
    }

    pub fn len(&self) -> usize {
        let allowances = self.allowances.lock().unwrap_or_else(|e| e.into_inner());
        allowances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

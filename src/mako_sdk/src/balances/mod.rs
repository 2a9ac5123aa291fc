use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use candid::Nat;
use futures::future::join_all;
use icrc_ledger_types::icrc1::account::Account;
use tracing::{debug, warn};

use crate::helpers::now_millis;
use crate::ledger::LedgerClient;
use crate::tokens::token::Token;

/// Balances younger than this are not re-read unless the caller forces it.
const BALANCE_TTL_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct TokenBalance {
    pub balance: Nat,
    pub updated_at_ms: u64,
}

/// Cached balances keyed by ledger canister id.
#[derive(Debug, Default)]
pub struct BalanceMap {
    balances: Mutex<HashMap<String, TokenBalance>>,
}

impl BalanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, canister_id: &str) -> Option<TokenBalance> {
        let balances = self.balances.lock().unwrap_or_else(|e| e.into_inner());
        balances.get(canister_id).cloned()
    }

    pub fn insert(&self, canister_id: &str, balance: Nat) {
        let mut balances = self.balances.lock().unwrap_or_else(|e| e.into_inner());
        balances.insert(
            canister_id.to_string(),
            TokenBalance {
                balance,
                updated_at_ms: now_millis(),
            },
        );
    }

    pub fn is_fresh(&self, canister_id: &str, max_age_ms: u64) -> bool {
        match self.get(canister_id) {
            Some(entry) => now_millis().saturating_sub(entry.updated_at_ms) < max_age_ms,
            None => false,
        }
    }
}

/// Balance reconciliation collaborator. Best-effort by contract: a failed
/// refresh must never fail a swap outcome that is already recorded.
#[async_trait]
pub trait BalanceRefresher: Send + Sync {
    async fn refresh(&self, owner: Account, tokens: &[Token], force_refresh: bool);
}

/// Reads balances off the ledgers and reconciles the cache. Tokens are
/// queried as a fan-out of independent calls; one branch failing leaves the
/// others untouched.
pub struct LedgerBalanceRefresher {
    ledger: Arc<LedgerClient>,
    balances: Arc<BalanceMap>,
}

impl LedgerBalanceRefresher {
    pub fn new(ledger: Arc<LedgerClient>, balances: Arc<BalanceMap>) -> Self {
        Self { ledger, balances }
    }
}

#[async_trait]
impl BalanceRefresher for LedgerBalanceRefresher {
    async fn refresh(&self, owner: Account, tokens: &[Token], force_refresh: bool) {
        let stale: Vec<&Token> = tokens
            .iter()
            .filter(|token| force_refresh || !self.balances.is_fresh(&token.canister_id, BALANCE_TTL_MS))
            .collect();
        if stale.is_empty() {
            return;
        }

        let queries = stale.iter().map(|token| {
            let owner = owner.clone();
            async move { (*token, self.ledger.try_get_balance(token, owner).await) }
        });

        for (token, outcome) in join_all(queries).await {
            match outcome {
                Ok(balance) => {
                    debug!("balance of {} refreshed: {}", token.symbol, balance);
                    self.balances.insert(&token.canister_id, balance);
                }
                Err(e) => warn!("balance refresh for {} failed: {}", token.symbol, e),
            }
        }
    }
}

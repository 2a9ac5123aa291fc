use std::collections::BTreeMap;
use std::sync::RwLock;

use super::token::Token;

/// Live token registry, shared read-mostly across the pipeline. Entries are
/// replaced wholesale on registry refresh, never mutated in place.
#[derive(Debug, Default)]
pub struct TokenMap {
    tokens: RwLock<BTreeMap<String, Token>>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_by_symbol(&self, symbol: &str) -> Option<Token> {
        let tokens = self.tokens.read().unwrap_or_else(|e| e.into_inner());
        tokens.get(symbol).cloned()
    }

    pub fn get_by_address(&self, canister_id: &str) -> Option<Token> {
        let tokens = self.tokens.read().unwrap_or_else(|e| e.into_inner());
        tokens.values().find(|token| token.canister_id == canister_id).cloned()
    }

    /// Resolves a token given either its symbol or its `IC.canister_id` form.
    pub fn get_by_token(&self, token: &str) -> Result<Token, String> {
        if let Some(token) = self.get_by_symbol(token) {
            return Ok(token);
        }
        let address = match token.split_once('.') {
            Some((_, address)) => address,
            None => token,
        };
        if let Some(token) = self.get_by_address(address) {
            return Ok(token);
        }
        Err(format!("Token {} not found", token))
    }

    pub fn insert(&self, token: Token) {
        let mut tokens = self.tokens.write().unwrap_or_else(|e| e.into_inner());
        tokens.insert(token.symbol.clone(), token);
    }

    pub fn replace_all(&self, new_tokens: Vec<Token>) {
        let mut tokens = self.tokens.write().unwrap_or_else(|e| e.into_inner());
        tokens.clear();
        for token in new_tokens {
            tokens.insert(token.symbol.clone(), token);
        }
    }

    pub fn all(&self) -> Vec<Token> {
        let tokens = self.tokens.read().unwrap_or_else(|e| e.into_inner());
        tokens.values().cloned().collect()
    }
}

pub mod token;
pub mod token_map;

use tracing::info;

use crate::settlement::SettlementActor;
use token_map::TokenMap;

/// Refreshes the live token registry from the settlement backend.
pub async fn load_tokens(settlement: &dyn SettlementActor, map: &TokenMap) -> Result<usize, String> {
    let tokens = settlement.tokens(None).await??;
    let tokens: Vec<_> = tokens.into_iter().filter(|token| !token.is_removed).collect();
    let count = tokens.len();
    map.replace_all(tokens);
    info!("token registry refreshed, {} tokens", count);
    Ok(count)
}

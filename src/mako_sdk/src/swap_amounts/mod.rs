pub mod swap_amounts_reply;

use candid::Nat;

use crate::error::SwapError;
use crate::helpers::nat_helpers::{nat_from_decimal_str, nat_to_decimal_str};
use crate::settlement::SettlementActor;
use crate::tokens::token_map::TokenMap;
use swap_amounts_reply::SwapAmountsReply;

/// Quote details shaped for the UI, amounts converted out of minor units.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapQuote {
    pub receive_amount: String,
    pub price: f64,
    pub slippage: f64,
    pub lp_fee: String,
    pub gas_fee: String,
    pub token_fee: String,
}

/// Raw quote from the backend. Anonymous query, no side effects.
pub async fn fetch_swap_amounts(
    settlement: &dyn SettlementActor,
    pay_symbol: &str,
    pay_amount: Nat,
    receive_symbol: &str,
) -> Result<SwapAmountsReply, SwapError> {
    settlement
        .swap_amounts(pay_symbol.to_string(), pay_amount, receive_symbol.to_string())
        .await
        .map_err(SwapError::Quote)?
        .map_err(SwapError::Quote)
}

/// Resolves both tokens against the live registry, fetches a quote and
/// converts the amounts and fees into the receive token's decimals.
pub async fn get_swap_quote(
    settlement: &dyn SettlementActor,
    tokens: &TokenMap,
    pay_token: &str,
    receive_token: &str,
    pay_amount: &str,
) -> Result<SwapQuote, SwapError> {
    let pay_token = tokens
        .get_by_token(pay_token)
        .map_err(|_| SwapError::TokenNotFound(pay_token.to_string()))?;
    let receive_token = tokens
        .get_by_token(receive_token)
        .map_err(|_| SwapError::TokenNotFound(receive_token.to_string()))?;
    let pay_amount = nat_from_decimal_str(pay_amount, pay_token.decimals).map_err(SwapError::InvalidAmount)?;

    let reply = fetch_swap_amounts(settlement, &pay_token.symbol, pay_amount, &receive_token.symbol).await?;

    let (lp_fee, gas_fee) = reply
        .txs
        .first()
        .map(|tx| {
            (
                nat_to_decimal_str(&tx.lp_fee, receive_token.decimals),
                nat_to_decimal_str(&tx.gas_fee, receive_token.decimals),
            )
        })
        .unwrap_or_else(|| ("0".to_string(), "0".to_string()));

    Ok(SwapQuote {
        receive_amount: nat_to_decimal_str(&reply.receive_amount, receive_token.decimals),
        price: reply.price,
        slippage: reply.slippage,
        lp_fee,
        gas_fee,
        token_fee: nat_to_decimal_str(&pay_token.fee, pay_token.decimals),
    })
}

pub mod agent_settlement;

use async_trait::async_trait;
use candid::Nat;

use crate::requests::request_reply::RequestsReply;
use crate::swap::swap_args::SwapArgs;
use crate::swap_amounts::swap_amounts_reply::SwapAmountsReply;
use crate::tokens::token::Token;

/// Transport to the settlement backend canister. The outer `Result` is the
/// transport outcome, the inner one the backend's own Ok/Err variant.
#[async_trait]
pub trait SettlementActor: Send + Sync {
    async fn swap_amounts(
        &self,
        pay_token: String,
        pay_amount: Nat,
        receive_token: String,
    ) -> Result<Result<SwapAmountsReply, String>, String>;

    async fn swap_async(&self, args: SwapArgs) -> Result<Result<u64, String>, String>;

    async fn requests(&self, request_id: Option<u64>) -> Result<Result<Vec<RequestsReply>, String>, String>;

    async fn tokens(&self, symbol: Option<String>) -> Result<Result<Vec<Token>, String>, String>;
}

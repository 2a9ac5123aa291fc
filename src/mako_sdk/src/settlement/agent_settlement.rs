use async_trait::async_trait;
use candid::{Decode, Encode, Nat, Principal};
use ic_agent::Agent;

use super::SettlementActor;
use crate::requests::request_reply::RequestsReply;
use crate::swap::swap_args::SwapArgs;
use crate::swap_amounts::swap_amounts_reply::SwapAmountsReply;
use crate::tokens::token::Token;

/// ic-agent backed settlement transport. Queries go out anonymously,
/// `swap_async` is signed by the session identity.
pub struct AgentSettlement {
    agent: Agent,
    query_agent: Agent,
    backend: Principal,
}

impl AgentSettlement {
    pub fn new(agent: Agent, query_agent: Agent, backend: Principal) -> Self {
        Self {
            agent,
            query_agent,
            backend,
        }
    }
}

#[async_trait]
impl SettlementActor for AgentSettlement {
    async fn swap_amounts(
        &self,
        pay_token: String,
        pay_amount: Nat,
        receive_token: String,
    ) -> Result<Result<SwapAmountsReply, String>, String> {
        let arg = Encode!(&pay_token, &pay_amount, &receive_token).map_err(|e| e.to_string())?;
        let response = self
            .query_agent
            .query(&self.backend, "swap_amounts")
            .with_arg(arg)
            .call()
            .await
            .map_err(|e| e.to_string())?;
        Decode!(&response, Result<SwapAmountsReply, String>).map_err(|e| e.to_string())
    }

    async fn swap_async(&self, args: SwapArgs) -> Result<Result<u64, String>, String> {
        let arg = Encode!(&args).map_err(|e| e.to_string())?;
        let response = self
            .agent
            .update(&self.backend, "swap_async")
            .with_arg(arg)
            .call_and_wait()
            .await
            .map_err(|e| e.to_string())?;
        Decode!(&response, Result<u64, String>).map_err(|e| e.to_string())
    }

    async fn requests(&self, request_id: Option<u64>) -> Result<Result<Vec<RequestsReply>, String>, String> {
        let arg = Encode!(&request_id).map_err(|e| e.to_string())?;
        let response = self
            .query_agent
            .query(&self.backend, "requests")
            .with_arg(arg)
            .call()
            .await
            .map_err(|e| e.to_string())?;
        Decode!(&response, Result<Vec<RequestsReply>, String>).map_err(|e| e.to_string())
    }

    async fn tokens(&self, symbol: Option<String>) -> Result<Result<Vec<Token>, String>, String> {
        let arg = Encode!(&symbol).map_err(|e| e.to_string())?;
        let response = self
            .query_agent
            .query(&self.backend, "tokens")
            .with_arg(arg)
            .call()
            .await
            .map_err(|e| e.to_string())?;
        Decode!(&response, Result<Vec<Token>, String>).map_err(|e| e.to_string())
    }
}

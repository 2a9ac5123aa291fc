use async_trait::async_trait;
use candid::{Decode, Encode, Nat, Principal};
use ic_agent::Agent;
use icrc_ledger_types::icrc1::account::Account;
use icrc_ledger_types::icrc1::transfer::{TransferArg, TransferError};
use icrc_ledger_types::icrc2::allowance::{Allowance as AllowanceReply, AllowanceArgs};
use icrc_ledger_types::icrc2::approve::{ApproveArgs, ApproveError};

use super::LedgerActor;

/// ic-agent backed ledger transport. Balance/fee/allowance reads go out
/// anonymously; approve and transfer are signed by the session identity.
pub struct AgentLedger {
    agent: Agent,
    query_agent: Agent,
}

impl AgentLedger {
    pub fn new(agent: Agent, query_agent: Agent) -> Self {
        Self { agent, query_agent }
    }
}

#[async_trait]
impl LedgerActor for AgentLedger {
    async fn icrc1_balance_of(&self, ledger: &Principal, account: Account) -> Result<Nat, String> {
        let arg = Encode!(&account).map_err(|e| e.to_string())?;
        let response = self
            .query_agent
            .query(ledger, "icrc1_balance_of")
            .with_arg(arg)
            .call()
            .await
            .map_err(|e| e.to_string())?;
        Decode!(&response, Nat).map_err(|e| e.to_string())
    }

    async fn icrc1_fee(&self, ledger: &Principal) -> Result<Nat, String> {
        let arg = Encode!().map_err(|e| e.to_string())?;
        let response = self
            .query_agent
            .query(ledger, "icrc1_fee")
            .with_arg(arg)
            .call()
            .await
            .map_err(|e| e.to_string())?;
        Decode!(&response, Nat).map_err(|e| e.to_string())
    }

    async fn icrc2_approve(&self, ledger: &Principal, args: ApproveArgs) -> Result<Result<Nat, ApproveError>, String> {
        let arg = Encode!(&args).map_err(|e| e.to_string())?;
        let response = self
            .agent
            .update(ledger, "icrc2_approve")
            .with_arg(arg)
            .call_and_wait()
            .await
            .map_err(|e| e.to_string())?;
        Decode!(&response, Result<Nat, ApproveError>).map_err(|e| e.to_string())
    }

    async fn icrc2_allowance(&self, ledger: &Principal, args: AllowanceArgs) -> Result<AllowanceReply, String> {
        let arg = Encode!(&args).map_err(|e| e.to_string())?;
        let response = self
            .query_agent
            .query(ledger, "icrc2_allowance")
            .with_arg(arg)
            .call()
            .await
            .map_err(|e| e.to_string())?;
        Decode!(&response, AllowanceReply).map_err(|e| e.to_string())
    }

    async fn icrc1_transfer(&self, ledger: &Principal, args: TransferArg) -> Result<Result<Nat, TransferError>, String> {
        let arg = Encode!(&args).map_err(|e| e.to_string())?;
        let response = self
            .agent
            .update(ledger, "icrc1_transfer")
            .with_arg(arg)
            .call_and_wait()
            .await
            .map_err(|e| e.to_string())?;
        Decode!(&response, Result<Nat, TransferError>).map_err(|e| e.to_string())
    }

    async fn icp_transfer(
        &self,
        ledger: &Principal,
        args: ic_ledger_types::TransferArgs,
    ) -> Result<Result<u64, ic_ledger_types::TransferError>, String> {
        let arg = Encode!(&args).map_err(|e| e.to_string())?;
        let response = self
            .agent
            .update(ledger, "transfer")
            .with_arg(arg)
            .call_and_wait()
            .await
            .map_err(|e| e.to_string())?;
        Decode!(&response, Result<u64, ic_ledger_types::TransferError>).map_err(|e| e.to_string())
    }
}

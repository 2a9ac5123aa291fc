pub mod agent_ledger;

use std::sync::Arc;

use async_trait::async_trait;
use candid::{Nat, Principal};
use icrc_ledger_types::icrc1::account::Account;
use icrc_ledger_types::icrc1::transfer::{Memo, TransferArg, TransferError};
use icrc_ledger_types::icrc2::allowance::{Allowance as AllowanceReply, AllowanceArgs};
use icrc_ledger_types::icrc2::approve::{ApproveArgs, ApproveError};
use num_traits::ToPrimitive;
use tracing::warn;

use crate::allowances::allowance_map::{Allowance, AllowanceMap};
use crate::error::SwapError;
use crate::helpers::nat_helpers::{nat_add, nat_multiply_u64, nat_zero};
use crate::helpers::now_millis;
use crate::ic::address::Address;
use crate::retry::with_retry;
use crate::settings::ClientSettings;
use crate::tokens::token::Token;

/// Transport to one ledger canister. The outer `Result` is the transport
/// outcome, the inner one the ledger's own Ok/Err variant.
#[async_trait]
pub trait LedgerActor: Send + Sync {
    async fn icrc1_balance_of(&self, ledger: &Principal, account: Account) -> Result<Nat, String>;

    async fn icrc1_fee(&self, ledger: &Principal) -> Result<Nat, String>;

    async fn icrc2_approve(&self, ledger: &Principal, args: ApproveArgs) -> Result<Result<Nat, ApproveError>, String>;

    async fn icrc2_allowance(&self, ledger: &Principal, args: AllowanceArgs) -> Result<AllowanceReply, String>;

    async fn icrc1_transfer(&self, ledger: &Principal, args: TransferArg) -> Result<Result<Nat, TransferError>, String>;

    async fn icp_transfer(
        &self,
        ledger: &Principal,
        args: ic_ledger_types::TransferArgs,
    ) -> Result<Result<u64, ic_ledger_types::TransferError>, String>;
}

/// Optional knobs of [`LedgerClient::send`], mirroring what the ledgers accept.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub fee: Option<Nat>,
    pub memo: Option<u64>,
    pub from_subaccount: Option<[u8; 32]>,
    pub created_at_time: Option<u64>,
}

/// Call surface over the token ledgers: balances, fees, approvals and
/// transfers, with the allowance cache kept in sync.
pub struct LedgerClient {
    actor: Arc<dyn LedgerActor>,
    allowances: Arc<AllowanceMap>,
    settings: ClientSettings,
}

impl LedgerClient {
    pub fn new(actor: Arc<dyn LedgerActor>, allowances: Arc<AllowanceMap>, settings: ClientSettings) -> Self {
        Self {
            actor,
            allowances,
            settings,
        }
    }

    /// Balance of `account`, retried on transient network failures.
    pub async fn try_get_balance(&self, token: &Token, account: Account) -> Result<Nat, String> {
        let ledger = token.ledger_id()?;
        with_retry(|| self.actor.icrc1_balance_of(&ledger, account.clone())).await
    }

    /// Balance lookups degrade to zero rather than failing: a broken balance
    /// display must never block the swap flow.
    pub async fn get_balance(&self, token: &Token, account: Account) -> Nat {
        match self.try_get_balance(token, account).await {
            Ok(balance) => balance,
            Err(e) => {
                warn!("balance query for {} failed: {}", token.symbol, e);
                nat_zero()
            }
        }
    }

    /// Ledger transaction fee, falling back to the configured default when
    /// the ledger cannot be read.
    pub async fn get_fee(&self, token: &Token) -> Nat {
        let ledger = match token.ledger_id() {
            Ok(ledger) => ledger,
            Err(e) => {
                warn!("fee query for {} failed: {}", token.symbol, e);
                return Nat::from(self.settings.fallback_ledger_fee);
            }
        };
        match self.actor.icrc1_fee(&ledger).await {
            Ok(fee) => fee,
            Err(e) => {
                warn!("fee query for {} failed: {}", token.symbol, e);
                Nat::from(self.settings.fallback_ledger_fee)
            }
        }
    }

    /// Reuses a cached allowance when it still covers `pay_amount` plus the
    /// transfer_from fee and has not aged past the approval expiry window;
    /// otherwise issues a fresh approval. Returns the approved amount.
    pub async fn check_and_approve_allowance(
        &self,
        token: &Token,
        owner: Account,
        spender: Account,
        pay_amount: &Nat,
    ) -> Result<Nat, SwapError> {
        let required = nat_add(pay_amount, &token.fee);
        let owner_text = owner.owner.to_text();
        let spender_text = spender.owner.to_text();

        if let Some(cached) = self.allowances.get(&token.canister_id, &owner_text, &spender_text) {
            let age_ms = now_millis().saturating_sub(cached.observed_at_ms);
            if cached.amount >= required && age_ms < self.settings.approval_expiry_ms {
                return Ok(cached.amount);
            }
        }

        // Approval ceiling: the full supply when the registry knows it,
        // otherwise 10x the required amount. Policy to cut down re-approval
        // frequency, not an invariant.
        let amount = match &token.total_supply {
            Some(total_supply) => total_supply.clone(),
            None => nat_multiply_u64(&required, 10),
        };
        let expires_at = (now_millis() + self.settings.approval_expiry_ms) * 1_000_000;

        let ledger = token.ledger_id().map_err(|message| SwapError::Approval {
            symbol: token.symbol.clone(),
            message,
        })?;
        let args = ApproveArgs {
            from_subaccount: None,
            spender,
            amount: amount.clone(),
            expected_allowance: None,
            expires_at: Some(expires_at),
            fee: None,
            memo: None,
            created_at_time: None,
        };

        match self.actor.icrc2_approve(&ledger, args).await {
            Ok(Ok(_block_index)) => {
                self.allowances.insert(Allowance {
                    canister_id: token.canister_id.clone(),
                    owner: owner_text,
                    spender: spender_text,
                    amount: amount.clone(),
                    observed_at_ms: now_millis(),
                });
                Ok(amount)
            }
            Ok(Err(e)) => Err(SwapError::Approval {
                symbol: token.symbol.clone(),
                message: format!("{:?}", e),
            }),
            Err(message) => Err(SwapError::Approval {
                symbol: token.symbol.clone(),
                message,
            }),
        }
    }

    /// Reads the live allowance off the ledger and refreshes the cache.
    pub async fn get_remote_allowance(&self, token: &Token, owner: Account, spender: Account) -> Result<Nat, String> {
        let ledger = token.ledger_id()?;
        let owner_text = owner.owner.to_text();
        let spender_text = spender.owner.to_text();
        let args = AllowanceArgs {
            account: owner,
            spender,
        };
        let reply = self.actor.icrc2_allowance(&ledger, args).await?;
        self.allowances.insert(Allowance {
            canister_id: token.canister_id.clone(),
            owner: owner_text,
            spender: spender_text,
            amount: reply.allowance.clone(),
            observed_at_ms: now_millis(),
        });
        Ok(reply.allowance)
    }

    /// Sends `amount` to `to`. ICP paid to a raw account identifier goes
    /// through the native ledger transfer with an explicit fee; everything
    /// else is an ICRC1 transfer to a principal/subaccount. Returns the
    /// ledger block index.
    pub async fn send(&self, token: &Token, to: &Address, amount: &Nat, options: SendOptions) -> Result<Nat, SwapError> {
        let transfer_error = |message: String| SwapError::Transfer {
            symbol: token.symbol.clone(),
            message,
        };
        let ledger = token.ledger_id().map_err(&transfer_error)?;
        let fee = options.fee.clone().unwrap_or_else(|| token.fee.clone());

        match to {
            Address::AccountId(account_id) => {
                if !token.is_icp() {
                    return Err(transfer_error("Account Id supported only for ICP token".to_string()));
                }
                let amount_e8s = amount
                    .0
                    .to_u64()
                    .ok_or_else(|| transfer_error(format!("Amount {} does not fit e8s", amount)))?;
                let fee_e8s = fee
                    .0
                    .to_u64()
                    .ok_or_else(|| transfer_error(format!("Fee {} does not fit e8s", fee)))?;
                let args = ic_ledger_types::TransferArgs {
                    memo: ic_ledger_types::Memo(options.memo.unwrap_or(0)),
                    amount: ic_ledger_types::Tokens::from_e8s(amount_e8s),
                    fee: ic_ledger_types::Tokens::from_e8s(fee_e8s),
                    from_subaccount: options.from_subaccount.map(ic_ledger_types::Subaccount),
                    to: account_id.to_owned(),
                    created_at_time: options.created_at_time.map(|timestamp_nanos| ic_ledger_types::Timestamp {
                        timestamp_nanos,
                    }),
                };
                match self.actor.icp_transfer(&ledger, args).await {
                    Ok(Ok(block_index)) => Ok(Nat::from(block_index)),
                    Ok(Err(e)) => Err(transfer_error(format!("{:?}", e))),
                    Err(e) => Err(transfer_error(e)),
                }
            }
            Address::PrincipalId(account) => {
                let args = TransferArg {
                    from_subaccount: options.from_subaccount,
                    to: account.to_owned(),
                    fee: Some(fee),
                    created_at_time: options.created_at_time,
                    memo: options.memo.map(Memo::from),
                    amount: amount.clone(),
                };
                match self.actor.icrc1_transfer(&ledger, args).await {
                    Ok(Ok(block_index)) => Ok(block_index),
                    Ok(Err(e)) => Err(transfer_error(format!("{:?}", e))),
                    Err(e) => Err(transfer_error(e)),
                }
            }
        }
    }
}

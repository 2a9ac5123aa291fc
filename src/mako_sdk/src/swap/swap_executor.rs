use std::sync::Arc;

use candid::Principal;
use icrc_ledger_types::icrc1::account::Account;
use tracing::{info, warn};

use crate::error::SwapError;
use crate::helpers::nat_helpers::nat_from_decimal_str;
use crate::ic::address::Address;
use crate::ledger::{LedgerClient, SendOptions};
use crate::notifications::NotificationSink;
use crate::settlement::SettlementActor;
use crate::swap::swap_args::SwapArgs;
use crate::swap::swap_monitor::SwapMonitor;
use crate::swap::swap_status::{SwapState, SwapStatus, SwapStatusMap};
use crate::swap_amounts::{get_swap_quote, SwapQuote};
use crate::tokens::token_map::TokenMap;
use crate::transfers::tx_id::TxId;
use crate::wallet::{require_wallet_connection, WalletSession};

/// One user-confirmed swap attempt. Amounts are human-readable decimal
/// strings; scaling into minor units happens against the live registry.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapExecuteArgs {
    pub swap_id: String,
    pub pay_token: String,
    pub pay_amount: String,
    pub receive_token: String,
    pub receive_amount: String,
    pub max_slippage: f64,
}

/// Drives a swap through its stages: validate session and tokens, settle the
/// pay-side precondition (approve or direct transfer), submit to the
/// backend, then hand the request over to the monitor.
pub struct SwapExecutor {
    wallet: Arc<dyn WalletSession>,
    tokens: Arc<TokenMap>,
    ledger: Arc<LedgerClient>,
    settlement: Arc<dyn SettlementActor>,
    statuses: Arc<SwapStatusMap>,
    monitor: SwapMonitor,
    notifications: Arc<dyn NotificationSink>,
    backend: Principal,
}

impl SwapExecutor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        wallet: Arc<dyn WalletSession>,
        tokens: Arc<TokenMap>,
        ledger: Arc<LedgerClient>,
        settlement: Arc<dyn SettlementActor>,
        statuses: Arc<SwapStatusMap>,
        monitor: SwapMonitor,
        notifications: Arc<dyn NotificationSink>,
        backend: Principal,
    ) -> Self {
        Self {
            wallet,
            tokens,
            ledger,
            settlement,
            statuses,
            monitor,
            notifications,
            backend,
        }
    }

    /// Runs the full pipeline for one swap intent. Never propagates an
    /// error: any failure is recorded as a terminal Failed status plus one
    /// error notification, and reported as `None`. On success the backend
    /// request id is returned while monitoring continues detached.
    pub async fn execute(&self, args: SwapExecuteArgs) -> Option<u64> {
        self.statuses.create(&args.swap_id, &args.pay_token, &args.receive_token);
        match self.execute_inner(&args).await {
            Ok(request_id) => {
                info!("swap {} submitted as request {}", args.swap_id, request_id);
                Some(request_id)
            }
            Err(error) => {
                let message = error.to_string();
                warn!("swap {} failed: {}", args.swap_id, message);
                self.statuses.update(&args.swap_id, SwapState::Failed, Some(message.clone()), None);
                self.notifications.error(&message);
                None
            }
        }
    }

    async fn execute_inner(&self, args: &SwapExecuteArgs) -> Result<u64, SwapError> {
        // Initiated: session, registry resolution, amount scaling
        let owner = require_wallet_connection(self.wallet.as_ref())?;
        let pay_token = self
            .tokens
            .get_by_token(&args.pay_token)
            .map_err(|_| SwapError::TokenNotFound(args.pay_token.clone()))?;
        let receive_token = self
            .tokens
            .get_by_token(&args.receive_token)
            .map_err(|_| SwapError::TokenNotFound(args.receive_token.clone()))?;
        let pay_amount = nat_from_decimal_str(&args.pay_amount, pay_token.decimals).map_err(SwapError::InvalidAmount)?;
        nat_from_decimal_str(&args.receive_amount, receive_token.decimals).map_err(SwapError::InvalidAmount)?;

        self.notifications.info(&format!(
            "Swapping {} {} to {} {}...",
            args.pay_amount, pay_token.symbol, args.receive_amount, receive_token.symbol
        ));

        // AwaitingPrecondition: allowance for ICRC2 tokens, direct transfer
        // to the settlement account for ICRC1-only tokens
        let backend_account = Account::from(self.backend);
        let pay_tx_id = if pay_token.icrc2 {
            self.ledger
                .check_and_approve_allowance(&pay_token, owner.clone(), backend_account, &pay_amount)
                .await?;
            None
        } else if pay_token.icrc1 {
            let block_index = self
                .ledger
                .send(
                    &pay_token,
                    &Address::PrincipalId(backend_account),
                    &pay_amount,
                    SendOptions {
                        fee: Some(pay_token.fee.clone()),
                        ..SendOptions::default()
                    },
                )
                .await
                .map_err(|e| {
                    warn!("pay transfer for swap {} failed: {}", args.swap_id, e);
                    SwapError::Transfer {
                        symbol: pay_token.symbol.clone(),
                        message: "Transaction failed during transfer/approval".to_string(),
                    }
                })?;
            Some(TxId::BlockIndex(block_index))
        } else {
            return Err(SwapError::UnsupportedTokenStandard(pay_token.symbol.clone()));
        };

        // Submitted: a rejection here is terminal, no monitoring session
        let swap_args = SwapArgs {
            pay_token: pay_token.symbol.clone(),
            pay_amount,
            pay_tx_id,
            receive_token: receive_token.symbol.clone(),
            receive_amount: None,
            receive_address: None,
            max_slippage: Some(args.max_slippage),
            referred_by: None,
        };
        let request_id = self
            .settlement
            .swap_async(swap_args)
            .await
            .map_err(SwapError::Submission)?
            .map_err(SwapError::Submission)?;

        // Monitoring: detached from this call, outcome lands in SwapStatus
        self.monitor.monitor_swap(&args.swap_id, request_id);
        Ok(request_id)
    }

    /// Synchronous snapshot read for the UI.
    pub fn get_swap_status(&self, swap_id: &str) -> Option<SwapStatus> {
        self.statuses.get(swap_id)
    }

    pub async fn get_swap_quote(&self, pay_token: &str, receive_token: &str, pay_amount: &str) -> Result<SwapQuote, SwapError> {
        get_swap_quote(self.settlement.as_ref(), self.tokens.as_ref(), pay_token, receive_token, pay_amount).await
    }

    /// Process-teardown hook: cancels all active monitoring sessions.
    pub fn cleanup(&self) {
        self.monitor.cleanup();
    }
}

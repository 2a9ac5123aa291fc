#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use candid::{Nat, Principal};
use icrc_ledger_types::icrc1::account::Account;
use icrc_ledger_types::icrc1::transfer::{TransferArg, TransferError};
use icrc_ledger_types::icrc2::allowance::{Allowance as AllowanceReply, AllowanceArgs};
use icrc_ledger_types::icrc2::approve::{ApproveArgs, ApproveError};

use mako_sdk::allowances::allowance_map::AllowanceMap;
use mako_sdk::balances::BalanceRefresher;
use mako_sdk::error::SwapError;
use mako_sdk::ledger::{LedgerActor, LedgerClient};
use mako_sdk::notifications::NotificationSink;
use mako_sdk::requests::request_reply::{Reply, Request, RequestsReply};
use mako_sdk::settings::ClientSettings;
use mako_sdk::settlement::SettlementActor;
use mako_sdk::swap::swap_args::SwapArgs;
use mako_sdk::swap::swap_executor::SwapExecutor;
use mako_sdk::swap::swap_monitor::SwapMonitor;
use mako_sdk::swap::swap_reply::SwapReply;
use mako_sdk::swap::swap_status::SwapStatusMap;
use mako_sdk::swap_amounts::swap_amounts_reply::SwapAmountsReply;
use mako_sdk::tokens::token::Token;
use mako_sdk::tokens::token_map::TokenMap;
use mako_sdk::wallet::{DisconnectedWallet, WalletSession};

pub const USER_PRINCIPAL: [u8; 29] = [7; 29];

pub fn user_principal() -> Principal {
    Principal::from_slice(&USER_PRINCIPAL)
}

pub fn user_account() -> Account {
    Account::from(user_principal())
}

// --- Tokens ---

pub fn make_token(symbol: &str, canister_id: &str, decimals: u8, fee: u64, icrc1: bool, icrc2: bool) -> Token {
    Token {
        token_id: 1,
        chain: "IC".to_string(),
        name: symbol.to_string(),
        symbol: symbol.to_string(),
        canister_id: canister_id.to_string(),
        decimals,
        fee: Nat::from(fee),
        icrc1,
        icrc2,
        icrc3: false,
        is_removed: false,
        total_supply: None,
    }
}

pub fn icp_token() -> Token {
    make_token("ICP", "ryjl3-tyaaa-aaaaa-aaaba-cai", 8, 10_000, true, true)
}

pub fn xtk_token() -> Token {
    make_token("XTK", "mxzaz-hqaaa-aaaar-qaada-cai", 6, 1_000, true, true)
}

/// ICRC1-only token, exercises the direct-transfer precondition.
pub fn ytk_token() -> Token {
    make_token("YTK", "xevnm-gaaaa-aaaar-qafnq-cai", 8, 10_000, true, false)
}

/// Token with no supported transfer standard.
pub fn ztk_token() -> Token {
    make_token("ZTK", "rdmx6-jaaaa-aaaaa-aaadq-cai", 8, 10_000, false, false)
}

// --- Wallet ---

pub struct StaticWallet {
    pub account: Account,
}

impl StaticWallet {
    pub fn new() -> Self {
        Self { account: user_account() }
    }
}

impl WalletSession for StaticWallet {
    fn is_connected(&self) -> bool {
        true
    }

    fn owner(&self) -> Result<Account, SwapError> {
        Ok(self.account.clone())
    }
}

// --- Notifications ---

#[derive(Default)]
pub struct RecordingNotifier {
    pub infos: Mutex<Vec<String>>,
    pub successes: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn info_messages(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn success_messages(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

// --- Balance refresher ---

#[derive(Default)]
pub struct CountingRefresher {
    pub calls: Mutex<Vec<(Account, usize, bool)>>,
}

impl CountingRefresher {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BalanceRefresher for CountingRefresher {
    async fn refresh(&self, owner: Account, tokens: &[Token], force_refresh: bool) {
        self.calls.lock().unwrap().push((owner, tokens.len(), force_refresh));
    }
}

// --- Ledger actor ---

/// Scripted ledger: each call pops the next queued result, falling back to a
/// benign default when the queue is drained.
#[derive(Default)]
pub struct MockLedger {
    pub balance_results: Mutex<VecDeque<Result<Nat, String>>>,
    pub fee_results: Mutex<VecDeque<Result<Nat, String>>>,
    pub approve_results: Mutex<VecDeque<Result<Result<Nat, ApproveError>, String>>>,
    pub allowance_results: Mutex<VecDeque<Result<AllowanceReply, String>>>,
    pub transfer_results: Mutex<VecDeque<Result<Result<Nat, TransferError>, String>>>,
    pub icp_transfer_results: Mutex<VecDeque<Result<Result<u64, ic_ledger_types::TransferError>, String>>>,
    pub balance_calls: Mutex<Vec<Account>>,
    pub approve_calls: Mutex<Vec<ApproveArgs>>,
    pub transfer_calls: Mutex<Vec<TransferArg>>,
    pub icp_transfer_calls: Mutex<Vec<ic_ledger_types::TransferArgs>>,
}

impl MockLedger {
    pub fn push_balance(&self, result: Result<Nat, String>) {
        self.balance_results.lock().unwrap().push_back(result);
    }

    pub fn push_fee(&self, result: Result<Nat, String>) {
        self.fee_results.lock().unwrap().push_back(result);
    }

    pub fn push_approve(&self, result: Result<Result<Nat, ApproveError>, String>) {
        self.approve_results.lock().unwrap().push_back(result);
    }

    pub fn push_transfer(&self, result: Result<Result<Nat, TransferError>, String>) {
        self.transfer_results.lock().unwrap().push_back(result);
    }

    pub fn push_icp_transfer(&self, result: Result<Result<u64, ic_ledger_types::TransferError>, String>) {
        self.icp_transfer_results.lock().unwrap().push_back(result);
    }

    pub fn push_allowance(&self, result: Result<AllowanceReply, String>) {
        self.allowance_results.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl LedgerActor for MockLedger {
    async fn icrc1_balance_of(&self, _ledger: &Principal, account: Account) -> Result<Nat, String> {
        self.balance_calls.lock().unwrap().push(account);
        self.balance_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Nat::from(0_u64)))
    }

    async fn icrc1_fee(&self, _ledger: &Principal) -> Result<Nat, String> {
        self.fee_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Nat::from(10_000_u64)))
    }

    async fn icrc2_approve(&self, _ledger: &Principal, args: ApproveArgs) -> Result<Result<Nat, ApproveError>, String> {
        self.approve_calls.lock().unwrap().push(args);
        self.approve_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Ok(Nat::from(1_u64))))
    }

    async fn icrc2_allowance(&self, _ledger: &Principal, _args: AllowanceArgs) -> Result<AllowanceReply, String> {
        self.allowance_results.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(AllowanceReply {
                allowance: Nat::from(0_u64),
                expires_at: None,
            })
        })
    }

    async fn icrc1_transfer(&self, _ledger: &Principal, args: TransferArg) -> Result<Result<Nat, TransferError>, String> {
        self.transfer_calls.lock().unwrap().push(args);
        self.transfer_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Ok(Nat::from(1_u64))))
    }

    async fn icp_transfer(
        &self,
        _ledger: &Principal,
        args: ic_ledger_types::TransferArgs,
    ) -> Result<Result<u64, ic_ledger_types::TransferError>, String> {
        self.icp_transfer_calls.lock().unwrap().push(args);
        self.icp_transfer_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Ok(1)))
    }
}

// --- Settlement actor ---

pub struct MockSettlement {
    pub swap_async_results: Mutex<VecDeque<Result<Result<u64, String>, String>>>,
    pub swap_async_calls: Mutex<Vec<SwapArgs>>,
    pub requests_results: Mutex<VecDeque<Result<Result<Vec<RequestsReply>, String>, String>>>,
    pub default_requests_result: Mutex<Result<Result<Vec<RequestsReply>, String>, String>>,
    pub requests_calls: Mutex<Vec<Option<u64>>>,
    pub swap_amounts_results: Mutex<VecDeque<Result<Result<SwapAmountsReply, String>, String>>>,
    pub tokens_result: Mutex<Result<Result<Vec<Token>, String>, String>>,
}

impl MockSettlement {
    pub fn new() -> Self {
        Self {
            swap_async_results: Mutex::new(VecDeque::new()),
            swap_async_calls: Mutex::new(Vec::new()),
            requests_results: Mutex::new(VecDeque::new()),
            default_requests_result: Mutex::new(Ok(Ok(Vec::new()))),
            requests_calls: Mutex::new(Vec::new()),
            swap_amounts_results: Mutex::new(VecDeque::new()),
            tokens_result: Mutex::new(Ok(Ok(Vec::new()))),
        }
    }

    pub fn push_swap_async(&self, result: Result<Result<u64, String>, String>) {
        self.swap_async_results.lock().unwrap().push_back(result);
    }

    pub fn push_requests(&self, result: Result<Result<Vec<RequestsReply>, String>, String>) {
        self.requests_results.lock().unwrap().push_back(result);
    }

    pub fn set_default_requests(&self, result: Result<Result<Vec<RequestsReply>, String>, String>) {
        *self.default_requests_result.lock().unwrap() = result;
    }

    pub fn requests_call_count(&self) -> usize {
        self.requests_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SettlementActor for MockSettlement {
    async fn swap_amounts(
        &self,
        _pay_token: String,
        _pay_amount: Nat,
        _receive_token: String,
    ) -> Result<Result<SwapAmountsReply, String>, String> {
        self.swap_amounts_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no quote scripted".to_string()))
    }

    async fn swap_async(&self, args: SwapArgs) -> Result<Result<u64, String>, String> {
        self.swap_async_calls.lock().unwrap().push(args);
        self.swap_async_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Ok(1)))
    }

    async fn requests(&self, request_id: Option<u64>) -> Result<Result<Vec<RequestsReply>, String>, String> {
        self.requests_calls.lock().unwrap().push(request_id);
        self.requests_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default_requests_result.lock().unwrap().clone())
    }

    async fn tokens(&self, _symbol: Option<String>) -> Result<Result<Vec<Token>, String>, String> {
        self.tokens_result.lock().unwrap().clone()
    }
}

// --- Reply builders ---

pub fn dummy_swap_args(pay_symbol: &str, receive_symbol: &str) -> SwapArgs {
    SwapArgs {
        pay_token: pay_symbol.to_string(),
        pay_amount: Nat::from(0_u64),
        pay_tx_id: None,
        receive_token: receive_symbol.to_string(),
        receive_amount: None,
        receive_address: None,
        max_slippage: Some(1.0),
        referred_by: None,
    }
}

pub fn pending_reply(request_id: u64, statuses: Vec<&str>) -> RequestsReply {
    RequestsReply {
        request_id,
        statuses: statuses.into_iter().map(String::from).collect(),
        request: Request::Swap(dummy_swap_args("ICP", "XTK")),
        reply: Reply::Pending,
        ts: 0,
    }
}

pub fn swap_reply(request_id: u64, status: &str, pay_symbol: &str, pay_amount: u64, receive_symbol: &str, receive_amount: u64) -> SwapReply {
    SwapReply {
        tx_id: 1,
        request_id,
        status: status.to_string(),
        pay_chain: "IC".to_string(),
        pay_address: String::new(),
        pay_symbol: pay_symbol.to_string(),
        pay_amount: Nat::from(pay_amount),
        receive_chain: "IC".to_string(),
        receive_address: String::new(),
        receive_symbol: receive_symbol.to_string(),
        receive_amount: Nat::from(receive_amount),
        mid_price: 0.5,
        price: 0.5,
        slippage: 0.1,
        txs: Vec::new(),
        transfer_ids: Vec::new(),
        claim_ids: Vec::new(),
        ts: 0,
    }
}

pub fn settled_reply(request_id: u64, statuses: Vec<&str>, reply: SwapReply) -> RequestsReply {
    RequestsReply {
        request_id,
        statuses: statuses.into_iter().map(String::from).collect(),
        request: Request::Swap(dummy_swap_args(&reply.pay_symbol, &reply.receive_symbol)),
        reply: Reply::Swap(reply),
        ts: 0,
    }
}

// --- Environment ---

pub struct TestContext {
    pub tokens: Arc<TokenMap>,
    pub allowances: Arc<AllowanceMap>,
    pub ledger_actor: Arc<MockLedger>,
    pub ledger: Arc<LedgerClient>,
    pub settlement: Arc<MockSettlement>,
    pub statuses: Arc<SwapStatusMap>,
    pub notifications: Arc<RecordingNotifier>,
    pub refresher: Arc<CountingRefresher>,
    pub monitor: SwapMonitor,
    pub executor: SwapExecutor,
    pub settings: ClientSettings,
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn setup_swap_environment() -> TestContext {
    setup_with_wallet(Arc::new(StaticWallet::new()))
}

pub fn setup_disconnected_environment() -> TestContext {
    setup_with_wallet(Arc::new(DisconnectedWallet))
}

pub fn setup_with_wallet(wallet: Arc<dyn WalletSession>) -> TestContext {
    init_tracing();
    let settings = ClientSettings::default();
    let backend = settings.backend_principal().expect("invalid backend canister id");

    let tokens = Arc::new(TokenMap::new());
    tokens.insert(icp_token());
    tokens.insert(xtk_token());
    tokens.insert(ytk_token());
    tokens.insert(ztk_token());

    let allowances = Arc::new(AllowanceMap::new());
    let ledger_actor = Arc::new(MockLedger::default());
    let ledger = Arc::new(LedgerClient::new(ledger_actor.clone(), allowances.clone(), settings.clone()));
    let settlement = Arc::new(MockSettlement::new());
    let statuses = Arc::new(SwapStatusMap::new());
    let notifications = Arc::new(RecordingNotifier::default());
    let refresher = Arc::new(CountingRefresher::default());

    let monitor = SwapMonitor::new(
        wallet.clone(),
        tokens.clone(),
        settlement.clone(),
        statuses.clone(),
        notifications.clone(),
        refresher.clone(),
        settings.clone(),
    );
    let executor = SwapExecutor::new(
        wallet,
        tokens.clone(),
        ledger.clone(),
        settlement.clone(),
        statuses.clone(),
        monitor.clone(),
        notifications.clone(),
        backend,
    );

    TestContext {
        tokens,
        allowances,
        ledger_actor,
        ledger,
        settlement,
        statuses,
        notifications,
        refresher,
        monitor,
        executor,
        settings,
    }
}

pub fn swap_args(swap_id: &str, pay_token: &str, pay_amount: &str, receive_token: &str, receive_amount: &str) -> mako_sdk::swap::swap_executor::SwapExecuteArgs {
    mako_sdk::swap::swap_executor::SwapExecuteArgs {
        swap_id: swap_id.to_string(),
        pay_token: pay_token.to_string(),
        pay_amount: pay_amount.to_string(),
        receive_token: receive_token.to_string(),
        receive_amount: receive_amount.to_string(),
        max_slippage: 1.0,
    }
}

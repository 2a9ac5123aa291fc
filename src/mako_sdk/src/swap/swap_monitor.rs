use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{error, warn};

use crate::balances::BalanceRefresher;
use crate::helpers::nat_helpers::nat_to_decimal_str;
use crate::notifications::NotificationSink;
use crate::requests::request_reply::Reply;
use crate::settings::ClientSettings;
use crate::settlement::SettlementActor;
use crate::swap::swap_reply::SwapReply;
use crate::swap::swap_status::{SwapSettlement, SwapState, SwapStatusMap};
use crate::tokens::token::Token;
use crate::tokens::token_map::TokenMap;
use crate::wallet::WalletSession;

/// Live polling state for one swap id. The spawned task owns the poll loop;
/// aborting the handle is the only way to stop it early.
#[derive(Debug)]
struct PollingSession {
    request_id: u64,
    handle: JoinHandle<()>,
}

enum PollOutcome {
    Continue,
    Terminal,
}

/// Single-flight polling state machine: at most one live session per swap
/// id. Drives SwapStatus from Pending through Processing to a terminal
/// state, emits deduplicated notifications, and triggers balance
/// reconciliation on success. Runs detached from the submitting call.
#[derive(Clone)]
pub struct SwapMonitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    wallet: Arc<dyn WalletSession>,
    tokens: Arc<TokenMap>,
    settlement: Arc<dyn SettlementActor>,
    statuses: Arc<SwapStatusMap>,
    notifications: Arc<dyn NotificationSink>,
    refresher: Arc<dyn BalanceRefresher>,
    settings: ClientSettings,
    sessions: Mutex<HashMap<String, PollingSession>>,
}

impl SwapMonitor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        wallet: Arc<dyn WalletSession>,
        tokens: Arc<TokenMap>,
        settlement: Arc<dyn SettlementActor>,
        statuses: Arc<SwapStatusMap>,
        notifications: Arc<dyn NotificationSink>,
        refresher: Arc<dyn BalanceRefresher>,
        settings: ClientSettings,
    ) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                wallet,
                tokens,
                settlement,
                statuses,
                notifications,
                refresher,
                settings,
                sessions: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Starts (or restarts) monitoring `request_id` under `swap_id`. A prior
    /// session for the same swap id is cancelled before the new one is
    /// scheduled, so there is never more than one live timer per swap.
    pub fn monitor_swap(&self, swap_id: &str, request_id: u64) {
        self.inner.stop_polling(swap_id);

        let inner = Arc::clone(&self.inner);
        let id = swap_id.to_string();
        let handle = tokio::spawn(async move {
            inner.poll_loop(id, request_id).await;
        });

        let mut sessions = self.inner.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.insert(swap_id.to_string(), PollingSession { request_id, handle });
    }

    /// Process-teardown hook: cancels every active session.
    pub fn cleanup(&self) {
        let mut sessions = self.inner.sessions.lock().unwrap_or_else(|e| e.into_inner());
        for (_, session) in sessions.drain() {
            session.handle.abort();
        }
    }

    pub fn active_sessions(&self) -> usize {
        let sessions = self.inner.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.len()
    }
}

impl MonitorInner {
    fn stop_polling(&self, swap_id: &str) {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(session) = sessions.remove(swap_id) {
            session.handle.abort();
        }
    }

    fn remove_session(&self, swap_id: &str, request_id: u64) {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        if sessions.get(swap_id).map(|session| session.request_id) == Some(request_id) {
            sessions.remove(swap_id);
        }
    }

    async fn poll_loop(self: Arc<Self>, swap_id: String, request_id: u64) {
        let started = Instant::now();
        let mut attempts: u32 = 0;
        let mut last_status = String::new();

        if let Some(status) = self.statuses.get(&swap_id) {
            self.notifications
                .info(&format!("Confirming swap of {} to {}...", status.pay_symbol, status.receive_symbol));
        }

        loop {
            if attempts >= self.settings.max_polling_attempts {
                self.statuses
                    .update(&swap_id, SwapState::Timeout, Some("Swap timed out".to_string()), None);
                self.notifications.error("Swap timed out");
                break;
            }

            match self.poll_once(&swap_id, request_id, &mut last_status).await {
                Ok(PollOutcome::Terminal) => break,
                Ok(PollOutcome::Continue) => {}
                Err(e) => {
                    error!("error monitoring swap {}: {}", swap_id, e);
                    self.statuses
                        .update(&swap_id, SwapState::Error, Some("Failed to monitor swap status".to_string()), None);
                    self.notifications.error("Failed to monitor swap status");
                    break;
                }
            }

            attempts += 1;
            let interval = if started.elapsed() >= Duration::from_millis(self.settings.fast_polling_delay_ms) {
                self.settings.fast_polling_interval_ms
            } else {
                self.settings.initial_polling_interval_ms
            };
            sleep(Duration::from_millis(interval)).await;
        }

        self.remove_session(&swap_id, request_id);
    }

    async fn poll_once(&self, swap_id: &str, request_id: u64, last_status: &mut String) -> Result<PollOutcome, String> {
        let replies = self.settlement.requests(Some(request_id)).await??;
        let reply = match replies.first() {
            Some(reply) => reply,
            None => return Ok(PollOutcome::Continue),
        };

        // one notification per distinct status string; terminal outcomes
        // notify in their own branches below
        if let Some(latest) = reply.statuses.last() {
            if latest != last_status {
                *last_status = latest.clone();
                if !latest.contains("Success") && !latest.contains("Failed") {
                    self.notifications.info(latest);
                }
            }
        }

        if let Some(failed) = reply.statuses.iter().find(|status| status.contains("Failed")) {
            self.statuses.update(swap_id, SwapState::Failed, Some(failed.clone()), None);
            self.notifications.error(failed);
            return Ok(PollOutcome::Terminal);
        }

        match &reply.reply {
            Reply::Pending => Ok(PollOutcome::Continue),
            Reply::Swap(swap_reply) => match SwapState::from_reply_status(&swap_reply.status) {
                SwapState::Success => {
                    self.handle_success(swap_id, swap_reply).await;
                    Ok(PollOutcome::Terminal)
                }
                SwapState::Failed => {
                    self.statuses
                        .update(swap_id, SwapState::Failed, Some("Swap failed".to_string()), None);
                    self.notifications.error("Swap failed");
                    Ok(PollOutcome::Terminal)
                }
                state => {
                    self.statuses.update(swap_id, state, None, None);
                    Ok(PollOutcome::Continue)
                }
            },
        }
    }

    async fn handle_success(&self, swap_id: &str, reply: &SwapReply) {
        let pay_token = self.tokens.get_by_symbol(&reply.pay_symbol);
        let receive_token = self.tokens.get_by_symbol(&reply.receive_symbol);

        let details = match (&pay_token, &receive_token) {
            (Some(pay), Some(receive)) => Some(SwapSettlement {
                pay_amount: nat_to_decimal_str(&reply.pay_amount, pay.decimals),
                pay_token: pay.clone(),
                receive_amount: nat_to_decimal_str(&reply.receive_amount, receive.decimals),
                receive_token: receive.clone(),
            }),
            _ => {
                warn!("settlement tokens {}/{} not in registry", reply.pay_symbol, reply.receive_symbol);
                None
            }
        };
        self.statuses.update(swap_id, SwapState::Success, None, details);
        self.notifications.success("Swap completed successfully");

        let (pay_token, receive_token) = match (pay_token, receive_token) {
            (Some(pay), Some(receive)) => (pay, receive),
            _ => return,
        };
        let owner = match self.wallet.owner() {
            Ok(owner) => owner,
            Err(_) => {
                warn!("missing wallet session for balance update");
                return;
            }
        };

        // reconcile now, then re-read on the configured schedule to absorb
        // the ledgers' eventual-consistency lag
        let tokens: Vec<Token> = vec![pay_token, receive_token];
        self.refresher.refresh(owner.clone(), &tokens, true).await;

        let refresher = Arc::clone(&self.refresher);
        let delays = self.settings.balance_refresh_delays_ms.clone();
        tokio::spawn(async move {
            let mut elapsed = 0;
            for delay in delays {
                sleep(Duration::from_millis(delay.saturating_sub(elapsed))).await;
                elapsed = delay;
                refresher.refresh(owner.clone(), &tokens, true).await;
            }
        });
    }
}

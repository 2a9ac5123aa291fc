use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::tokens::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapState {
    Pending,
    Processing,
    Success,
    Failed,
    Timeout,
    Error,
}

impl SwapState {
    /// Terminal records take no further transitions or polls.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SwapState::Success | SwapState::Failed | SwapState::Timeout | SwapState::Error)
    }

    /// Maps the backend's reply status string onto the lifecycle.
    pub fn from_reply_status(status: &str) -> SwapState {
        match status {
            "Success" => SwapState::Success,
            "Failed" => SwapState::Failed,
            _ => SwapState::Processing,
        }
    }
}

impl Display for SwapState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            SwapState::Pending => write!(f, "Pending"),
            SwapState::Processing => write!(f, "Processing"),
            SwapState::Success => write!(f, "Success"),
            SwapState::Failed => write!(f, "Failed"),
            SwapState::Timeout => write!(f, "Timeout"),
            SwapState::Error => write!(f, "Error"),
        }
    }
}

/// Final amounts of a settled swap, converted out of minor units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapSettlement {
    pub pay_amount: String,
    pub pay_token: Token,
    pub receive_amount: String,
    pub receive_token: Token,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapStatus {
    pub swap_id: String,
    pub pay_symbol: String,
    pub receive_symbol: String,
    pub state: SwapState,
    pub error: Option<String>,
    pub details: Option<SwapSettlement>,
}

/// Status store read by the UI. Written by the executor at submission and by
/// the monitor afterwards.
#[derive(Debug, Default)]
pub struct SwapStatusMap {
    statuses: Mutex<HashMap<String, SwapStatus>>,
}

impl SwapStatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fresh attempt for `swap_id`, replacing any earlier record.
    pub fn create(&self, swap_id: &str, pay_symbol: &str, receive_symbol: &str) {
        let mut statuses = self.statuses.lock().unwrap_or_else(|e| e.into_inner());
        statuses.insert(
            swap_id.to_string(),
            SwapStatus {
                swap_id: swap_id.to_string(),
                pay_symbol: pay_symbol.to_string(),
                receive_symbol: receive_symbol.to_string(),
                state: SwapState::Pending,
                error: None,
                details: None,
            },
        );
    }

    pub fn get(&self, swap_id: &str) -> Option<SwapStatus> {
        let statuses = self.statuses.lock().unwrap_or_else(|e| e.into_inner());
        statuses.get(swap_id).cloned()
    }

    /// Applies a transition. Returns false if the record is already terminal:
    /// terminal states are final and further updates are dropped.
    pub fn update(&self, swap_id: &str, state: SwapState, error: Option<String>, details: Option<SwapSettlement>) -> bool {
        let mut statuses = self.statuses.lock().unwrap_or_else(|e| e.into_inner());
        match statuses.get_mut(swap_id) {
            Some(status) if status.state.is_terminal() => false,
            Some(status) => {
                status.state = state;
                status.error = error;
                if details.is_some() {
                    status.details = details;
                }
                true
            }
            None => {
                statuses.insert(
                    swap_id.to_string(),
                    SwapStatus {
                        swap_id: swap_id.to_string(),
                        pay_symbol: String::new(),
                        receive_symbol: String::new(),
                        state,
                        error,
                        details,
                    },
                );
                true
            }
        }
    }
}

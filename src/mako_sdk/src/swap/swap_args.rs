use candid::{CandidType, Nat};
use serde::{Deserialize, Serialize};

use crate::transfers::tx_id::TxId;

/// Arguments of the backend's `swap_async` call.
#[derive(CandidType, Debug, Clone, Serialize, Deserialize)]
pub struct SwapArgs {
    pub pay_token: String,
    pub pay_amount: Nat,
    pub pay_tx_id: Option<TxId>, // None for the approve flow, Some after a direct transfer
    pub receive_token: String,
    pub receive_amount: Option<Nat>,
    pub receive_address: Option<String>,
    pub max_slippage: Option<f64>,
    pub referred_by: Option<String>,
}

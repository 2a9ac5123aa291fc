pub mod allowances;
pub mod balances;
pub mod error;
pub mod helpers;
pub mod ic;
pub mod ledger;
pub mod notifications;
pub mod requests;
pub mod retry;
pub mod settings;
pub mod settlement;
pub mod swap;
pub mod swap_amounts;
pub mod tokens;
pub mod transfers;
pub mod wallet;

pub const APP_NAME: &str = "MakoSwap SDK";
pub const APP_VERSION: &str = "v0.0.4";

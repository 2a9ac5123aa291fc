use std::sync::Arc;

use candid::Principal;
use ic_agent::{Agent, Identity};
use icrc_ledger_types::icrc1::account::Account;

use crate::error::SwapError;
use crate::ic::agent::{create_agent, create_anonymous_agent};

/// Identity/session collaborator. The embedding application decides how
/// identities are created, persisted and revoked; the pipeline only asks
/// whether a session exists and which account owns it.
pub trait WalletSession: Send + Sync {
    fn is_connected(&self) -> bool;

    /// The owner account of the active session, or `WalletNotConnected`.
    fn owner(&self) -> Result<Account, SwapError>;
}

pub fn require_wallet_connection(wallet: &dyn WalletSession) -> Result<Account, SwapError> {
    wallet.owner()
}

/// ic-agent backed session: one signing agent for updates, one anonymous
/// agent for queries.
pub struct AgentWallet {
    principal: Principal,
    agent: Agent,
    anonymous_agent: Agent,
}

impl AgentWallet {
    pub async fn connect(url: &str, identity: Arc<dyn Identity>, fetch_root_key: bool) -> Result<Self, String> {
        let principal = identity.sender().map_err(|e| e.to_string())?;
        let agent = create_agent(url, identity, fetch_root_key).await?;
        let anonymous_agent = create_anonymous_agent(url, fetch_root_key).await?;
        Ok(Self {
            principal,
            agent,
            anonymous_agent,
        })
    }

    pub fn principal(&self) -> Principal {
        self.principal
    }

    /// The signing handle for update calls; anonymous handle for queries.
    pub fn agent(&self, anonymous: bool) -> &Agent {
        if anonymous {
            &self.anonymous_agent
        } else {
            &self.agent
        }
    }
}

impl WalletSession for AgentWallet {
    fn is_connected(&self) -> bool {
        true
    }

    fn owner(&self) -> Result<Account, SwapError> {
        Ok(Account::from(self.principal))
    }
}

/// Placeholder session used before the user connects a wallet.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisconnectedWallet;

impl WalletSession for DisconnectedWallet {
    fn is_connected(&self) -> bool {
        false
    }

    fn owner(&self) -> Result<Account, SwapError> {
        Err(SwapError::WalletNotConnected)
    }
}

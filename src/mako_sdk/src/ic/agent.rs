use std::sync::Arc;

use ed25519_consensus::SigningKey;
use ic_agent::identity::{AnonymousIdentity, BasicIdentity};
use ic_agent::{Agent, Identity};
use rand::thread_rng;

pub const IC_URL: &str = if cfg!(feature = "local") {
    "http://localhost:4943"
} else {
    "https://ic0.app"
};

/// Builds an agent for the given identity. `fetch_root_key` must be true for
/// local replicas only, never against mainnet.
pub async fn create_agent(url: &str, identity: Arc<dyn Identity>, fetch_root_key: bool) -> Result<Agent, String> {
    let agent = Agent::builder()
        .with_url(url)
        .with_arc_identity(identity)
        .build()
        .map_err(|e| e.to_string())?;
    if fetch_root_key {
        agent.fetch_root_key().await.map_err(|e| e.to_string())?;
    }
    Ok(agent)
}

pub async fn create_anonymous_agent(url: &str, fetch_root_key: bool) -> Result<Agent, String> {
    create_agent(url, Arc::new(AnonymousIdentity), fetch_root_key).await
}

/// Fresh throwaway identity, mainly for local testing and faucet flows.
pub fn generate_identity() -> BasicIdentity {
    BasicIdentity::from_signing_key(SigningKey::new(thread_rng()))
}

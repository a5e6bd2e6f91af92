use std::collections::HashMap;
use std::sync::Arc;

use alloy::{
    providers::{Provider, ProviderBuilder, RootProvider},
    transports::http::{Client, Http},
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info};
use url::Url;

use crate::config::models::Chain;

/// Errors that can occur when connecting to chain RPC endpoints
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("RPC connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Chain id mismatch at {url}: node reports {actual}, configured {expected}")]
    ChainIdMismatch {
        url: String,
        expected: u64,
        actual: u64,
    },
}

/// Type alias for the alloy provider we will use
pub type EthProvider = RootProvider<Http<Client>>;

/// Manages the connections to EVM chains
///
/// Providers are created lazily on first use and shared by every listener
/// subscribed through the same chain id. Failed connection attempts are not
/// cached; a later registration for the same chain retries.
pub struct ChainManager {
    /// Map of chain id to provider
    providers: Mutex<HashMap<u64, Arc<EthProvider>>>,
}

impl ChainManager {
    pub fn new() -> Self {
        Self {
            providers: Mutex::new(HashMap::new()),
        }
    }

    /// Get the provider for a chain, connecting if none exists yet
    pub async fn get_or_connect(&self, chain: &Chain) -> Result<Arc<EthProvider>, ChainError> {
        let mut providers = self.providers.lock().await;

        if let Some(provider) = providers.get(&chain.network.chain_id) {
            return Ok(provider.clone());
        }

        let provider = Arc::new(Self::connect(chain).await?);
        providers.insert(chain.network.chain_id, provider.clone());

        Ok(provider)
    }

    /// Create a provider for a chain and verify it serves the expected chain id
    async fn connect(chain: &Chain) -> Result<EthProvider, ChainError> {
        let url = Url::parse(&chain.rpc_https).map_err(|e| {
            ChainError::InvalidRpcUrl(format!("{}: {}", chain.rpc_https, e))
        })?;

        let provider = ProviderBuilder::new().on_http(url);

        // Test the connection and confirm the node serves the configured chain
        match provider.get_chain_id().await {
            Ok(actual) if actual == chain.network.chain_id => {
                info!(
                    "Connected to {} RPC at {}, chain id {}",
                    chain.network.name, chain.rpc_https, actual
                );
                Ok(provider)
            }
            Ok(actual) => {
                error!(
                    "RPC at {} reports chain id {}, expected {}",
                    chain.rpc_https, actual, chain.network.chain_id
                );
                Err(ChainError::ChainIdMismatch {
                    url: chain.rpc_https.clone(),
                    expected: chain.network.chain_id,
                    actual,
                })
            }
            Err(err) => {
                error!("Failed to connect to RPC at {}: {}", chain.rpc_https, err);
                Err(ChainError::ConnectionFailed(err.to_string()))
            }
        }
    }
}

impl Default for ChainManager {
    fn default() -> Self {
        Self::new()
    }
}

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Top-level document wrapper; the YAML file nests everything under a
/// single `config` key
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigDocument {
    pub config: HeraldConfig,
}

/// The main configuration structure for Herald
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HeraldConfig {
    /// Webhook endpoint that receives every event notification
    #[serde(rename = "webhookURL")]
    #[validate(url)]
    pub webhook_url: String,

    /// Contract interface definitions, referenced by deployments via `type`
    #[validate]
    pub abis: Vec<Abi>,

    /// Contract deployments to watch, grouped by chain id
    #[serde(rename = "allContracts")]
    #[validate]
    pub all_contracts: Vec<ChainContracts>,

    /// Chains this instance can connect to
    #[validate]
    pub chains: Vec<Chain>,
}

/// A named contract interface: an ordered list of human-readable entries
/// (events, functions, constructors, ...)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Abi {
    /// Interface type deployments refer to (e.g. "erc20")
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub kind: String,

    /// Interface entries in declaration order
    pub definition: Vec<String>,
}

/// All deployments to watch on a single chain
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChainContracts {
    /// Chain these deployments live on
    #[serde(rename = "chainId")]
    pub chain_id: u64,

    /// Deployments to watch on this chain
    #[validate]
    pub contracts: Vec<ContractDeployment>,
}

/// A single contract deployment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContractDeployment {
    /// On-chain address of the deployment
    pub address: Address,

    /// ABI type this deployment implements
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub kind: String,

    /// Display name used in logs and notifications
    #[validate(length(min = 1))]
    pub name: String,
}

/// Connection details for one chain
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Chain {
    /// Network identity reported in notifications
    #[validate]
    pub network: Network,

    /// WebSocket RPC endpoint
    #[serde(rename = "rpcWS")]
    #[validate(url)]
    pub rpc_ws: String,

    /// HTTPS RPC endpoint used to establish the chain connection
    #[serde(rename = "rpcHTTPS")]
    #[validate(url)]
    pub rpc_https: String,
}

/// Network identity of a chain
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Network {
    /// Human-readable network name (e.g. "sepolia")
    #[validate(length(min = 1))]
    pub name: String,

    /// Chain id as reported by the node
    #[serde(rename = "chainId")]
    pub chain_id: u64,
}

impl HeraldConfig {
    /// Find the ABI registered under the given type; first match wins
    pub fn find_abi_by_type(&self, kind: &str) -> Option<&Abi> {
        self.abis.iter().find(|abi| abi.kind == kind)
    }

    /// Find the chain serving the given chain id; first match wins
    pub fn find_chain_by_id(&self, chain_id: u64) -> Option<&Chain> {
        self.chains
            .iter()
            .find(|chain| chain.network.chain_id == chain_id)
    }
}

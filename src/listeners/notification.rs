//! Outbound webhook notification payload

use serde::Serialize;

use crate::config::models::ContractDeployment;

/// Webhook notification for a single observed event
///
/// Field names are part of the wire contract; endpoint integrations match on
/// them, so renames here are breaking changes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// The configured deployment the event came from
    pub contract_defn: ContractDeployment,
    /// Name of the emitted event
    pub event_name: String,
    /// Decoded arguments in declaration order
    pub params: Vec<serde_json::Value>,
    /// Raw event metadata
    pub event: EventRecord,
    /// Chain the event was observed on
    pub chain: ChainIdentity,
}

/// Raw metadata of the emitting log entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub block_number: u64,
    pub block_hash: String,
    pub transaction_hash: String,
    pub log_index: u64,
    pub transaction_index: u64,
    pub removed: bool,
    pub address: String,
    pub data: String,
    pub event: String,
    pub event_signature: String,
    pub args: Vec<serde_json::Value>,
}

/// Identity of the chain an event was observed on
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainIdentity {
    pub chain_id: u64,
    pub network: String,
}

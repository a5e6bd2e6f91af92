//! Listener registration and event processing

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use alloy::dyn_abi::{DecodedEvent, DynSolValue, EventExt};
use alloy::json_abi::Event;
use alloy::primitives::B256;
use alloy::providers::Provider;
use alloy::rpc::types::{Filter, Log};
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::dispatcher::WebhookDispatcher;
use super::error::{ListenerError, Result};
use super::notification::{ChainIdentity, EventRecord, Notification};
use crate::abi;
use crate::constants;
use crate::metrics::ListenerMetrics;
use crate::network::{ChainManager, EthProvider};
use crate::subscriptions::SubscriptionTarget;

/// Attaches listeners for subscription targets and forwards their events
pub struct ListenerRegistry {
    chain_manager: Arc<ChainManager>,
    dispatcher: Arc<WebhookDispatcher>,
}

/// A registered listener: its target plus the parsed event ABI
pub struct ActiveListener {
    pub target: SubscriptionTarget,
    pub event: Event,
    /// Canonical signature, e.g. `Transfer(address,address,uint256)`
    pub signature: String,
    /// keccak256 of the canonical signature (topic0)
    pub selector: B256,
}

impl ActiveListener {
    /// Resolve and parse the target's event declaration
    pub fn new(target: SubscriptionTarget) -> Result<Self> {
        let declaration = abi::find_event_declaration(&target.abi, &target.event_name)
            .ok_or_else(|| ListenerError::DeclarationNotFound {
                event: target.event_name.clone(),
                abi: target.abi.kind.clone(),
            })?;

        let event = abi::parse_event_declaration(declaration).map_err(|e| {
            ListenerError::InvalidDeclaration {
                event: target.event_name.clone(),
                reason: e.to_string(),
            }
        })?;

        let signature = event.signature();
        let selector = event.selector();

        Ok(Self {
            target,
            event,
            signature,
            selector,
        })
    }

    /// Decode a log against this listener's event and build the notification
    pub fn notification_for(&self, log: &Log) -> Result<Notification> {
        let decoded = self.event.decode_log(log.data(), true).map_err(|e| {
            ListenerError::DecodingError {
                event: self.target.event_name.clone(),
                contract: self.target.deployment.name.clone(),
                reason: e.to_string(),
            }
        })?;

        let params = params_in_declaration_order(&self.event, decoded);

        let event_record = EventRecord {
            block_number: log.block_number.unwrap_or_default(),
            block_hash: format!("{:?}", log.block_hash.unwrap_or_default()),
            transaction_hash: format!("{:?}", log.transaction_hash.unwrap_or_default()),
            log_index: log.log_index.unwrap_or_default(),
            transaction_index: log.transaction_index.unwrap_or_default(),
            removed: log.removed,
            address: format!("0x{}", hex::encode(log.address())),
            data: format!("0x{}", hex::encode(&log.data().data)),
            event: self.target.event_name.clone(),
            event_signature: self.signature.clone(),
            args: params.clone(),
        };

        Ok(Notification {
            contract_defn: self.target.deployment.clone(),
            event_name: self.target.event_name.clone(),
            params,
            event: event_record,
            chain: ChainIdentity {
                chain_id: self.target.chain.network.chain_id,
                network: self.target.chain.network.name.clone(),
            },
        })
    }
}

impl ListenerRegistry {
    pub fn new(chain_manager: Arc<ChainManager>, dispatcher: Arc<WebhookDispatcher>) -> Self {
        Self {
            chain_manager,
            dispatcher,
        }
    }

    /// Attach listeners for every target and start polling for their events
    ///
    /// A chain whose connection fails loses all its targets; a target whose
    /// declaration cannot be parsed is skipped alone. Neither is fatal.
    pub async fn register_all(&self, targets: Vec<SubscriptionTarget>) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();

        info!(
            "Registering listeners for {} subscription target(s)",
            targets.len()
        );

        let targets_by_chain = Self::group_targets_by_chain(targets);

        for (chain_id, chain_targets) in targets_by_chain {
            // All targets in a group carry the same resolved chain
            let chain = chain_targets[0].chain.clone();

            let provider = match self.chain_manager.get_or_connect(&chain).await {
                Ok(provider) => provider,
                Err(e) => {
                    error!(
                        "Skipping {} listener(s) for chain {}: {}",
                        chain_targets.len(),
                        chain_id,
                        e
                    );
                    continue;
                }
            };

            let (tx, rx) = mpsc::channel(constants::polling::EVENT_CHANNEL_CAPACITY);

            let mut listener_count = 0i64;
            for target in chain_targets {
                let listener = match ActiveListener::new(target) {
                    Ok(listener) => Arc::new(listener),
                    Err(e) => {
                        warn!("Skipping listener: {}", e);
                        continue;
                    }
                };

                info!(
                    "Registering interest in {} events on contract {} ({}) on {}",
                    listener.target.event_name,
                    listener.target.deployment.name,
                    listener.target.deployment.address,
                    chain.network.name
                );

                handles.push(Self::spawn_poll_task(
                    provider.clone(),
                    listener,
                    tx.clone(),
                ));
                listener_count += 1;
            }
            drop(tx);

            ListenerMetrics::global().update_active_listeners(&chain.network.name, listener_count);

            // A chain whose every target was skipped needs no processing loop
            if listener_count == 0 {
                continue;
            }

            handles.push(self.spawn_processing_loop(rx));
        }

        handles
    }

    /// Group targets by chain id so each chain gets one connection and one
    /// processing loop
    fn group_targets_by_chain(
        targets: Vec<SubscriptionTarget>,
    ) -> HashMap<u64, Vec<SubscriptionTarget>> {
        let mut grouped = HashMap::new();
        for target in targets {
            grouped
                .entry(target.chain.network.chain_id)
                .or_insert_with(Vec::new)
                .push(target);
        }
        grouped
    }

    /// Poll for new logs matching one listener
    fn spawn_poll_task(
        provider: Arc<EthProvider>,
        listener: Arc<ActiveListener>,
        tx: mpsc::Sender<(Arc<ActiveListener>, Log)>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            // The first observed head becomes the baseline; only blocks after
            // it are inspected, so historic events are never replayed
            let mut last_block: Option<u64> = None;

            loop {
                tokio::time::sleep(Duration::from_secs(constants::polling::POLL_INTERVAL_SECS))
                    .await;

                let head = match provider.get_block_number().await {
                    Ok(head) => head,
                    Err(e) => {
                        error!("Failed to get block number: {}", e);
                        ListenerMetrics::global().record_processing_error(
                            &listener.target.deployment.name,
                            "block_number_fetch",
                        );
                        continue;
                    }
                };

                let Some(previous) = last_block else {
                    last_block = Some(head);
                    continue;
                };

                if head <= previous {
                    continue;
                }

                debug!(
                    "Checking for {} events from block {} to {} on {}",
                    listener.target.event_name,
                    previous + 1,
                    head,
                    listener.target.deployment.name
                );

                let filter = Filter::new()
                    .address(listener.target.deployment.address)
                    .event_signature(listener.selector)
                    .from_block(previous + 1)
                    .to_block(head);

                match provider.get_logs(&filter).await {
                    Ok(logs) => {
                        if !logs.is_empty() {
                            info!(
                                "Found {} {} event(s) on {} between blocks {} and {}",
                                logs.len(),
                                listener.target.event_name,
                                listener.target.deployment.name,
                                previous + 1,
                                head
                            );
                        }

                        for log in logs {
                            ListenerMetrics::global().record_event_received(
                                &listener.target.deployment.name,
                                &listener.target.event_name,
                            );

                            if let Err(e) = tx.send((listener.clone(), log)).await {
                                error!("Failed to queue event for processing: {}", e);
                                ListenerMetrics::global().record_processing_error(
                                    &listener.target.deployment.name,
                                    "channel_send",
                                );
                            }
                        }

                        last_block = Some(head);
                    }
                    Err(e) => {
                        // The window is retried on the next tick
                        error!(
                            "Failed to fetch logs for {}: {}",
                            listener.target.deployment.name, e
                        );
                        ListenerMetrics::global().record_processing_error(
                            &listener.target.deployment.name,
                            "log_fetch",
                        );
                    }
                }
            }
        })
    }

    /// Process events for one chain as they arrive
    fn spawn_processing_loop(
        &self,
        mut rx: mpsc::Receiver<(Arc<ActiveListener>, Log)>,
    ) -> JoinHandle<()> {
        let dispatcher = self.dispatcher.clone();

        tokio::spawn(async move {
            while let Some((listener, log)) = rx.recv().await {
                if let Err(e) = Self::process_event(&listener, log, &dispatcher) {
                    error!(
                        "Failed to process {} event: {}",
                        listener.target.event_name, e
                    );
                    ListenerMetrics::global()
                        .record_processing_error(&listener.target.deployment.name, "decode");
                }
            }
        })
    }

    /// Decode one log and hand the notification to the dispatcher
    fn process_event(
        listener: &ActiveListener,
        log: Log,
        dispatcher: &Arc<WebhookDispatcher>,
    ) -> Result<()> {
        debug!(
            "Processing {} event at block {} (tx: {:?})",
            listener.target.event_name,
            log.block_number.unwrap_or_default(),
            log.transaction_hash.unwrap_or_default()
        );

        let notification = listener.notification_for(&log)?;

        info!(
            "Sending notification for {} on {} on {} during txn {}",
            notification.event_name,
            listener.target.deployment.name,
            listener.target.chain.network.name,
            notification.event.transaction_hash
        );

        dispatcher.dispatch(notification);

        Ok(())
    }
}

/// Reassemble decoded values into declaration order
///
/// `decode_log` splits values into indexed and non-indexed groups; the
/// notification carries them interleaved exactly as declared.
fn params_in_declaration_order(event: &Event, decoded: DecodedEvent) -> Vec<serde_json::Value> {
    let mut indexed = decoded.indexed.into_iter();
    let mut body = decoded.body.into_iter();

    event
        .inputs
        .iter()
        .filter_map(|input| {
            if input.indexed {
                indexed.next()
            } else {
                body.next()
            }
        })
        .map(|value| dyn_value_to_json(&value))
        .collect()
}

/// Convert a decoded Solidity value into its JSON rendering
///
/// Numbers become decimal strings so 256-bit values survive JSON parsers;
/// byte values are 0x-prefixed hex.
fn dyn_value_to_json(value: &DynSolValue) -> serde_json::Value {
    match value {
        DynSolValue::Address(address) => json!(format!("0x{:x}", address)),
        DynSolValue::Bool(b) => json!(b),
        DynSolValue::Uint(value, _) => json!(value.to_string()),
        DynSolValue::Int(value, _) => json!(value.to_string()),
        DynSolValue::Bytes(bytes) => json!(format!("0x{}", hex::encode(bytes))),
        DynSolValue::FixedBytes(word, size) => {
            json!(format!("0x{}", hex::encode(&word.as_slice()[..*size])))
        }
        DynSolValue::String(s) => json!(s),
        DynSolValue::Function(f) => json!(format!("0x{}", hex::encode(f))),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) | DynSolValue::Tuple(values) => {
            serde_json::Value::Array(values.iter().map(dyn_value_to_json).collect())
        }
    }
}

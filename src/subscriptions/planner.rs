use tracing::{error, info, warn};

use crate::abi;
use crate::config::models::{Abi, Chain, ContractDeployment, HeraldConfig};

/// One (chain, contract, event) combination to attach a listener for.
///
/// Targets own their data so they can outlive the configuration borrow and
/// move into spawned tasks.
#[derive(Debug, Clone)]
pub struct SubscriptionTarget {
    pub chain: Chain,
    pub abi: Abi,
    pub deployment: ContractDeployment,
    pub event_name: String,
}

/// Resolves the configuration into the full list of subscription targets.
///
/// Planning is never fatal. A contracts entry naming an unknown chain id is
/// skipped whole; a deployment naming an unknown ABI type is skipped alone.
/// Target order follows config declaration order.
pub fn plan(config: &HeraldConfig) -> Vec<SubscriptionTarget> {
    let mut targets = Vec::new();

    for chain_contracts in &config.all_contracts {
        let Some(chain) = config.find_chain_by_id(chain_contracts.chain_id) else {
            error!("No chain found for id {}", chain_contracts.chain_id);
            continue;
        };

        info!("Processing chain: {}", chain.network.name);

        for deployment in &chain_contracts.contracts {
            info!("Processing contract: {}", deployment.name);

            let Some(abi) = config.find_abi_by_type(&deployment.kind) else {
                warn!(
                    "No ABI found for type '{}' on contract '{}', skipping",
                    deployment.kind, deployment.name
                );
                continue;
            };

            for event_name in abi::extract_event_names(abi) {
                targets.push(SubscriptionTarget {
                    chain: chain.clone(),
                    abi: abi.clone(),
                    deployment: deployment.clone(),
                    event_name,
                });
            }
        }
    }

    targets
}

//! Durable protocol facts.
//!
//! Every permissioned component appends typed events to its [`EventLog`]
//! when it commits a state change. The log is the auditable record the
//! admin surfaces promise: tests and operators can replay exactly what was
//! approved, bound, installed and bridged, in order. Each record also goes
//! out on the `holograph::events` tracing target as a one-line summary.

use alloy_primitives::{Address, B256, U256};
use tracing::info;

use crate::messaging::TransportNonce;
use crate::registry::chains::{ChainIdRow, ProtocolChainId, TransportChainId};

/// A committed protocol state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolEvent {
    /// Factory deployed a holographable contract and registered its hash
    HolographableContractDeployed { address: Address, config_hash: B256 },
    /// Deployer allowlist membership changed
    DeployerApprovalChanged {
        identity: Address,
        approved: bool,
        by: Address,
    },
    /// A contract type tag was bound to an address
    ContractTypeBound {
        tag: B256,
        address: Address,
        by: Address,
    },
    /// Type tags were added to or removed from the reserved set
    ReservedTypesChanged {
        tags: Vec<B256>,
        reserved: bool,
        by: Address,
    },
    /// The registered factory address was rotated
    FactoryChanged {
        previous: Address,
        current: Address,
        by: Address,
    },
    /// Chain id translation rows were installed
    ChainIdRowsInstalled { rows: Vec<ChainIdRow>, by: Address },
    /// A counterpart bridge was registered for a transport chain
    RemoteBridgeSet {
        chain: TransportChainId,
        bridge: Address,
        by: Address,
    },
    /// An asset left this chain through the bridge
    AssetSent {
        collection: Address,
        from_owner: Address,
        to_owner: Address,
        asset_id: U256,
        destination: ProtocolChainId,
        nonce: TransportNonce,
    },
    /// An asset arrived on this chain through the bridge
    AssetDelivered {
        collection: Address,
        to_owner: Address,
        asset_id: U256,
        source: ProtocolChainId,
        nonce: TransportNonce,
    },
}

impl ProtocolEvent {
    /// One-line human-readable form, used for the tracing feed.
    pub fn summary(&self) -> String {
        match self {
            Self::HolographableContractDeployed { address, config_hash } => format!(
                "holographable contract deployed: address={address} config_hash={}",
                short_hash(config_hash)
            ),
            Self::DeployerApprovalChanged { identity, approved, by } => format!(
                "deployer approval changed: identity={identity} approved={approved} by={by}"
            ),
            Self::ContractTypeBound { tag, address, by } => format!(
                "contract type bound: tag={} address={address} by={by}",
                short_hash(tag)
            ),
            Self::ReservedTypesChanged { tags, reserved, by } => format!(
                "reserved types changed: count={} reserved={reserved} by={by}",
                tags.len()
            ),
            Self::FactoryChanged { previous, current, by } => {
                format!("factory changed: previous={previous} current={current} by={by}")
            }
            Self::ChainIdRowsInstalled { rows, by } => {
                format!("chain id rows installed: count={} by={by}", rows.len())
            }
            Self::RemoteBridgeSet { chain, bridge, by } => {
                format!("remote bridge set: chain={chain} bridge={bridge} by={by}")
            }
            Self::AssetSent {
                collection,
                from_owner,
                to_owner,
                asset_id,
                destination,
                nonce,
            } => format!(
                "asset sent: collection={collection} asset_id={asset_id} from={from_owner} \
                 to={to_owner} destination={destination} nonce={nonce}"
            ),
            Self::AssetDelivered {
                collection,
                to_owner,
                asset_id,
                source,
                nonce,
            } => format!(
                "asset delivered: collection={collection} asset_id={asset_id} to={to_owner} \
                 source={source} nonce={nonce}"
            ),
        }
    }
}

/// First 4 bytes of a hash, enough to eyeball in a log line.
fn short_hash(hash: &B256) -> String {
    format!("0x{}..", hex::encode(&hash[..4]))
}

/// Append-only record of committed protocol events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<ProtocolEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `event` and emit its summary on the tracing feed.
    pub fn record(&mut self, event: ProtocolEvent) {
        info!(target: "holograph::events", "{}", event.summary());
        self.entries.push(event);
    }

    /// All recorded events, oldest first.
    pub fn entries(&self) -> &[ProtocolEvent] {
        &self.entries
    }

    /// Most recent event, if any.
    pub fn last(&self) -> Option<&ProtocolEvent> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut log = EventLog::new();
        assert!(log.is_empty());

        let first = ProtocolEvent::DeployerApprovalChanged {
            identity: address!("1111111111111111111111111111111111111111"),
            approved: true,
            by: address!("2222222222222222222222222222222222222222"),
        };
        let second = ProtocolEvent::FactoryChanged {
            previous: Address::ZERO,
            current: address!("00000000000000000000000000000000FAC70400"),
            by: address!("2222222222222222222222222222222222222222"),
        };

        log.record(first.clone());
        log.record(second.clone());

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries(), &[first, second.clone()]);
        assert_eq!(log.last(), Some(&second));
    }

    #[test]
    fn test_summary_names_the_actors() {
        let event = ProtocolEvent::HolographableContractDeployed {
            address: address!("3333333333333333333333333333333333333333"),
            config_hash: b256!(
                "ABCDEF0100000000000000000000000000000000000000000000000000000000"
            ),
        };
        let summary = event.summary();
        assert!(summary.contains("0x3333333333333333333333333333333333333333"));
        assert!(summary.contains("0xabcdef01.."));
    }
}

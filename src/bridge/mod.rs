//! Cross-chain asset bridge.
//!
//! The bridge moves assets between chains with burn-on-exit, mint-on-entry
//! semantics over an authenticated transport:
//!
//! ```text
//!   bridge_out(destination, collection, from, to, asset_id)
//!     ├─ from owns the asset?            NotOwner
//!     ├─ destination mapped + paired?    UnknownDestination
//!     ├─ burn locally
//!     └─ transport.send(message)         burn undone on TransportFailure
//!
//!   on_message_received(source_chain, source_address, nonce, payload)
//!     ├─ source is the paired bridge?    UnauthorizedSource
//!     ├─ nonce unseen?                   Replayed
//!     ├─ payload decodes?                MalformedPayload
//!     ├─ addressed to this chain?        ChainMismatch
//!     └─ consume nonce + mint            all-or-nothing
//! ```
//!
//! Replay protection keys consumed nonces by source transport chain, so
//! counterpart bridges with overlapping nonce sequences cannot mask each
//! other. Applied and sent transfers are kept as [`TransferRecord`]s.

pub mod message;

use std::collections::{HashMap, HashSet};

use alloy_primitives::{Address, U256};
use tracing::{debug, warn};

use crate::errors::ProtocolError;
use crate::events::{EventLog, ProtocolEvent};
use crate::messaging::{MessagingModule, TransportNonce, TransportReceipt};
use crate::registry::chains::{NativeChainId, ProtocolChainId, TransportChainId};
use crate::registry::HolographRegistry;
use crate::token::TokenLedger;

use message::BridgeMessage;

/// Where a recorded transfer stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    /// Burned here and handed to the transport
    Sent,
    /// Received from a counterpart and minted here
    Delivered,
}

/// Durable record of one transfer this bridge handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub status: TransferStatus,
    pub message: BridgeMessage,
    /// Transport chain on the far side: the destination for sent transfers,
    /// the source for delivered ones.
    pub counterpart_chain: TransportChainId,
    pub nonce: TransportNonce,
}

/// Asset bridge endpoint living on one chain.
#[derive(Debug, Clone)]
pub struct HolographBridge {
    /// Identity this bridge sends under; counterparts authenticate it.
    address: Address,
    admin: Address,
    /// The chain this endpoint runs on, in native numbering.
    local_chain: NativeChainId,
    remote_bridges: HashMap<TransportChainId, Address>,
    consumed: HashMap<TransportChainId, HashSet<TransportNonce>>,
    transfers: Vec<TransferRecord>,
    events: EventLog,
}

impl HolographBridge {
    pub fn new(address: Address, admin: Address, local_chain: NativeChainId) -> Self {
        Self {
            address,
            admin,
            local_chain,
            remote_bridges: HashMap::new(),
            consumed: HashMap::new(),
            transfers: Vec::new(),
            events: EventLog::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn local_chain(&self) -> NativeChainId {
        self.local_chain
    }

    /// Register the counterpart bridge for a transport chain. Admin only.
    pub fn set_remote_bridge(
        &mut self,
        caller: Address,
        chain: TransportChainId,
        bridge: Address,
    ) -> Result<(), ProtocolError> {
        if caller != self.admin {
            return Err(ProtocolError::NotAdmin { caller });
        }

        self.remote_bridges.insert(chain, bridge);
        self.events.record(ProtocolEvent::RemoteBridgeSet {
            chain,
            bridge,
            by: caller,
        });
        Ok(())
    }

    /// Registered counterpart for `chain`, if any.
    pub fn remote_bridge(&self, chain: TransportChainId) -> Option<Address> {
        self.remote_bridges.get(&chain).copied()
    }

    /// Whether `nonce` from `chain` was already applied.
    pub fn has_consumed(&self, chain: TransportChainId, nonce: TransportNonce) -> bool {
        self.consumed
            .get(&chain)
            .is_some_and(|nonces| nonces.contains(&nonce))
    }

    /// Transfers this bridge sent or delivered, oldest first.
    pub fn transfers(&self) -> &[TransferRecord] {
        &self.transfers
    }

    /// Audit log of bridge activity.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Send an asset to `destination`. Burns locally, then hands the
    /// encoded message to the transport; if the transport refuses, the
    /// burn is undone and the asset stays with `from_owner`.
    #[allow(clippy::too_many_arguments)]
    pub fn bridge_out<L: TokenLedger, M: MessagingModule>(
        &mut self,
        registry: &HolographRegistry,
        ledger: &mut L,
        transport: &mut M,
        destination: ProtocolChainId,
        collection: Address,
        from_owner: Address,
        to_owner: Address,
        asset_id: U256,
    ) -> Result<TransportReceipt, ProtocolError> {
        if ledger.owner_of(collection, asset_id) != Some(from_owner) {
            return Err(ProtocolError::NotOwner {
                collection,
                asset_id,
                claimed: from_owner,
            });
        }

        let Some(destination_transport) = registry.chain_ids().protocol_to_transport(destination)
        else {
            return Err(ProtocolError::UnknownDestination {
                chain: destination.into(),
            });
        };
        let Some(remote_bridge) = self.remote_bridge(destination_transport) else {
            debug!(
                target: "holograph::bridge",
                chain = %destination_transport,
                "no counterpart bridge registered"
            );
            return Err(ProtocolError::UnknownDestination {
                chain: destination_transport.into(),
            });
        };
        let Some(source_transport) = registry.chain_ids().native_to_transport(self.local_chain)
        else {
            warn!(
                target: "holograph::bridge",
                chain = %self.local_chain,
                "local chain has no transport mapping"
            );
            return Err(ProtocolError::UnknownDestination {
                chain: self.local_chain.into(),
            });
        };

        let payload = ledger.bridge_payload(collection, asset_id);
        ledger.burn(collection, asset_id)?;

        let message = BridgeMessage {
            destination_chain_id: destination,
            collection,
            from_owner,
            to_owner,
            asset_id,
            payload: payload.clone(),
        };

        let receipt = match transport.send(
            source_transport,
            self.address,
            destination_transport,
            remote_bridge,
            message.to_bytes(),
        ) {
            Ok(receipt) => receipt,
            Err(err) => {
                warn!(
                    target: "holograph::bridge",
                    %err,
                    "transport refused the message, restoring asset"
                );
                ledger.mint(collection, asset_id, from_owner, &payload)?;
                return Err(ProtocolError::TransportFailure(err.to_string()));
            }
        };

        self.transfers.push(TransferRecord {
            status: TransferStatus::Sent,
            message,
            counterpart_chain: destination_transport,
            nonce: receipt.nonce,
        });
        self.events.record(ProtocolEvent::AssetSent {
            collection,
            from_owner,
            to_owner,
            asset_id,
            destination,
            nonce: receipt.nonce,
        });
        Ok(receipt)
    }

    /// Apply a message delivered by the transport. Exactly-once: the nonce
    /// is consumed and the mint applied together, or neither.
    pub fn on_message_received<L: TokenLedger>(
        &mut self,
        registry: &HolographRegistry,
        ledger: &mut L,
        source_chain: TransportChainId,
        source_address: Address,
        nonce: TransportNonce,
        payload: &[u8],
    ) -> Result<BridgeMessage, ProtocolError> {
        if self.remote_bridge(source_chain) != Some(source_address) {
            warn!(
                target: "holograph::bridge",
                chain = %source_chain,
                %source_address,
                "message from unregistered source"
            );
            return Err(ProtocolError::UnauthorizedSource {
                chain: source_chain,
                address: source_address,
            });
        }

        if self.has_consumed(source_chain, nonce) {
            return Err(ProtocolError::Replayed {
                chain: source_chain,
                nonce,
            });
        }

        let message = BridgeMessage::from_bytes(payload)
            .map_err(|err| ProtocolError::MalformedPayload(err.to_string()))?;

        let Some(local_protocol) = registry.chain_ids().native_to_protocol(self.local_chain)
        else {
            warn!(
                target: "holograph::bridge",
                chain = %self.local_chain,
                "local chain has no protocol mapping"
            );
            return Err(ProtocolError::UnknownDestination {
                chain: self.local_chain.into(),
            });
        };
        if message.destination_chain_id != local_protocol {
            return Err(ProtocolError::ChainMismatch {
                expected: local_protocol.into(),
                got: message.destination_chain_id.into(),
            });
        }
        let Some(source_protocol) = registry.chain_ids().transport_to_protocol(source_chain)
        else {
            return Err(ProtocolError::UnknownDestination {
                chain: source_chain.into(),
            });
        };

        // Consume the nonce and mint as one step: a failed mint releases
        // the nonce so the delivery can be retried.
        self.consumed.entry(source_chain).or_default().insert(nonce);
        if let Err(err) = ledger.mint(
            message.collection,
            message.asset_id,
            message.to_owner,
            &message.payload,
        ) {
            if let Some(nonces) = self.consumed.get_mut(&source_chain) {
                nonces.remove(&nonce);
            }
            return Err(err.into());
        }

        debug!(
            target: "holograph::bridge",
            collection = %message.collection,
            asset_id = %message.asset_id,
            %nonce,
            "inbound transfer applied"
        );
        self.transfers.push(TransferRecord {
            status: TransferStatus::Delivered,
            message: message.clone(),
            counterpart_chain: source_chain,
            nonce,
        });
        self.events.record(ProtocolEvent::AssetDelivered {
            collection: message.collection,
            to_owner: message.to_owner,
            asset_id: message.asset_id,
            source: source_protocol,
            nonce,
        });
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::{LocalTransport, MessagingError};
    use crate::registry::chains::ChainIdRow;
    use crate::token::InMemoryLedger;
    use alloy_primitives::{address, Bytes};

    const ADMIN: Address = address!("00000000000000000000000000000000000AD414");
    const FACTORY: Address = address!("00000000000000000000000000000000FAC70400");
    const BRIDGE_A: Address = address!("00000000000000000000000000000000B41D6E0A");
    const BRIDGE_B: Address = address!("00000000000000000000000000000000B41D6E0B");
    const COLLECTION: Address = address!("00000000000000000000000000000000000000C1");
    const ALICE: Address = address!("000000000000000000000000000000000000A11C");
    const BOB: Address = address!("0000000000000000000000000000000000000B0B");

    const CHAIN_A: NativeChainId = NativeChainId(1338);
    const CHAIN_B: NativeChainId = NativeChainId(70);
    const PROTO_A: ProtocolChainId = ProtocolChainId(4001);
    const PROTO_B: ProtocolChainId = ProtocolChainId(4002);
    const WIRE_A: TransportChainId = TransportChainId(1013);
    const WIRE_B: TransportChainId = TransportChainId(1014);

    fn registry() -> HolographRegistry {
        let mut registry = HolographRegistry::new(ADMIN, FACTORY);
        registry
            .update_chain_id_maps(
                ADMIN,
                &[ChainIdRow::new(1338, 4001, 1013), ChainIdRow::new(70, 4002, 1014)],
            )
            .unwrap();
        registry
    }

    fn bridge_on_a() -> HolographBridge {
        let mut bridge = HolographBridge::new(BRIDGE_A, ADMIN, CHAIN_A);
        bridge.set_remote_bridge(ADMIN, WIRE_B, BRIDGE_B).unwrap();
        bridge
    }

    fn bridge_on_b() -> HolographBridge {
        let mut bridge = HolographBridge::new(BRIDGE_B, ADMIN, CHAIN_B);
        bridge.set_remote_bridge(ADMIN, WIRE_A, BRIDGE_A).unwrap();
        bridge
    }

    fn ledger_with_asset() -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new();
        ledger
            .mint(
                COLLECTION,
                U256::from(42),
                ALICE,
                &Bytes::from_static(b"metadata"),
            )
            .unwrap();
        ledger
    }

    /// Transport that refuses everything, for rollback tests.
    struct RefusingTransport;

    impl MessagingModule for RefusingTransport {
        fn send(
            &mut self,
            _source_chain: TransportChainId,
            _source_address: Address,
            _destination_chain: TransportChainId,
            _destination_address: Address,
            _payload: Bytes,
        ) -> Result<TransportReceipt, MessagingError> {
            Err(MessagingError::SendFailed("link down".to_string()))
        }
    }

    // ── Outbound ───────────────────────────────────────────────────────────

    #[test]
    fn test_bridge_out_burns_and_queues_the_message() {
        let registry = registry();
        let mut ledger = ledger_with_asset();
        let mut transport = LocalTransport::new();
        let mut bridge = bridge_on_a();

        let receipt = bridge
            .bridge_out(
                &registry,
                &mut ledger,
                &mut transport,
                PROTO_B,
                COLLECTION,
                ALICE,
                BOB,
                U256::from(42),
            )
            .unwrap();

        assert_eq!(receipt.nonce, TransportNonce(1));
        assert_eq!(receipt.destination_chain, WIRE_B);
        assert_eq!(receipt.destination_address, BRIDGE_B);
        assert_eq!(ledger.owner_of(COLLECTION, U256::from(42)), None);
        assert_eq!(transport.pending(WIRE_B), 1);

        let in_flight = transport.take_next(WIRE_B).unwrap();
        assert_eq!(in_flight.source_chain, WIRE_A);
        assert_eq!(in_flight.source_address, BRIDGE_A);
        let message = BridgeMessage::from_bytes(&in_flight.payload).unwrap();
        assert_eq!(message.destination_chain_id, PROTO_B);
        assert_eq!(message.to_owner, BOB);
        assert_eq!(message.payload, Bytes::from_static(b"metadata"));

        assert_eq!(bridge.transfers().len(), 1);
        assert_eq!(bridge.transfers()[0].status, TransferStatus::Sent);
        assert_eq!(bridge.transfers()[0].counterpart_chain, WIRE_B);
    }

    #[test]
    fn test_bridge_out_requires_the_current_owner() {
        let registry = registry();
        let mut ledger = ledger_with_asset();
        let mut transport = LocalTransport::new();
        let mut bridge = bridge_on_a();

        let err = bridge
            .bridge_out(
                &registry,
                &mut ledger,
                &mut transport,
                PROTO_B,
                COLLECTION,
                BOB,
                BOB,
                U256::from(42),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::NotOwner {
                collection: COLLECTION,
                asset_id: U256::from(42),
                claimed: BOB,
            }
        );

        // Nothing moved.
        assert_eq!(ledger.owner_of(COLLECTION, U256::from(42)), Some(ALICE));
        assert_eq!(transport.total_in_flight(), 0);
        assert!(bridge.transfers().is_empty());
    }

    #[test]
    fn test_bridge_out_to_unmapped_destination_fails() {
        let registry = registry();
        let mut ledger = ledger_with_asset();
        let mut transport = LocalTransport::new();
        let mut bridge = bridge_on_a();

        let err = bridge
            .bridge_out(
                &registry,
                &mut ledger,
                &mut transport,
                ProtocolChainId(9999),
                COLLECTION,
                ALICE,
                BOB,
                U256::from(42),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::UnknownDestination {
                chain: ProtocolChainId(9999).into(),
            }
        );
        assert_eq!(ledger.owner_of(COLLECTION, U256::from(42)), Some(ALICE));
    }

    #[test]
    fn test_bridge_out_without_counterpart_bridge_fails() {
        let registry = registry();
        let mut ledger = ledger_with_asset();
        let mut transport = LocalTransport::new();
        // No remote bridges registered at all.
        let mut bridge = HolographBridge::new(BRIDGE_A, ADMIN, CHAIN_A);

        let err = bridge
            .bridge_out(
                &registry,
                &mut ledger,
                &mut transport,
                PROTO_B,
                COLLECTION,
                ALICE,
                BOB,
                U256::from(42),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::UnknownDestination { chain: WIRE_B.into() }
        );
        assert_eq!(ledger.owner_of(COLLECTION, U256::from(42)), Some(ALICE));
    }

    #[test]
    fn test_transport_failure_restores_the_asset() {
        let registry = registry();
        let mut ledger = ledger_with_asset();
        let mut bridge = bridge_on_a();

        let err = bridge
            .bridge_out(
                &registry,
                &mut ledger,
                &mut RefusingTransport,
                PROTO_B,
                COLLECTION,
                ALICE,
                BOB,
                U256::from(42),
            )
            .unwrap_err();
        assert!(matches!(err, ProtocolError::TransportFailure(_)));

        // Burn undone, payload intact, nothing recorded.
        assert_eq!(ledger.owner_of(COLLECTION, U256::from(42)), Some(ALICE));
        assert_eq!(
            ledger.bridge_payload(COLLECTION, U256::from(42)),
            Bytes::from_static(b"metadata")
        );
        assert!(bridge.transfers().is_empty());
        assert!(bridge.events().is_empty());
    }

    // ── Inbound ────────────────────────────────────────────────────────────

    fn deliver_out_of_a(
        bridge_b: &mut HolographBridge,
        registry_b: &HolographRegistry,
        ledger_b: &mut InMemoryLedger,
        transport: &mut LocalTransport,
    ) -> Result<BridgeMessage, ProtocolError> {
        let in_flight = transport.take_next(WIRE_B).unwrap();
        bridge_b.on_message_received(
            registry_b,
            ledger_b,
            in_flight.source_chain,
            in_flight.source_address,
            in_flight.nonce,
            &in_flight.payload,
        )
    }

    #[test]
    fn test_round_trip_delivers_to_recipient() {
        let registry = registry();
        let mut transport = LocalTransport::new();

        let mut ledger_a = ledger_with_asset();
        let mut bridge_a = bridge_on_a();
        let mut ledger_b = InMemoryLedger::new();
        let mut bridge_b = bridge_on_b();

        bridge_a
            .bridge_out(
                &registry,
                &mut ledger_a,
                &mut transport,
                PROTO_B,
                COLLECTION,
                ALICE,
                BOB,
                U256::from(42),
            )
            .unwrap();

        let message =
            deliver_out_of_a(&mut bridge_b, &registry, &mut ledger_b, &mut transport).unwrap();
        assert_eq!(message.to_owner, BOB);

        // Asset exists exactly once, on chain B, with its payload.
        assert_eq!(ledger_a.owner_of(COLLECTION, U256::from(42)), None);
        assert_eq!(ledger_b.owner_of(COLLECTION, U256::from(42)), Some(BOB));
        assert_eq!(
            ledger_b.bridge_payload(COLLECTION, U256::from(42)),
            Bytes::from_static(b"metadata")
        );

        assert_eq!(bridge_b.transfers().len(), 1);
        assert_eq!(bridge_b.transfers()[0].status, TransferStatus::Delivered);
        assert!(bridge_b.has_consumed(WIRE_A, TransportNonce(1)));
    }

    #[test]
    fn test_replayed_delivery_is_rejected() {
        let registry = registry();
        let mut transport = LocalTransport::new();

        let mut ledger_a = ledger_with_asset();
        let mut bridge_a = bridge_on_a();
        let mut ledger_b = InMemoryLedger::new();
        let mut bridge_b = bridge_on_b();

        bridge_a
            .bridge_out(
                &registry,
                &mut ledger_a,
                &mut transport,
                PROTO_B,
                COLLECTION,
                ALICE,
                BOB,
                U256::from(42),
            )
            .unwrap();
        let in_flight = transport.take_next(WIRE_B).unwrap();

        bridge_b
            .on_message_received(
                &registry,
                &mut ledger_b,
                in_flight.source_chain,
                in_flight.source_address,
                in_flight.nonce,
                &in_flight.payload,
            )
            .unwrap();

        // Burn on B so a replay would be visible as a fresh mint.
        ledger_b.burn(COLLECTION, U256::from(42)).unwrap();

        let err = bridge_b
            .on_message_received(
                &registry,
                &mut ledger_b,
                in_flight.source_chain,
                in_flight.source_address,
                in_flight.nonce,
                &in_flight.payload,
            )
            .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::Replayed {
                chain: WIRE_A,
                nonce: TransportNonce(1),
            }
        );
        assert_eq!(ledger_b.owner_of(COLLECTION, U256::from(42)), None);
        assert_eq!(bridge_b.transfers().len(), 1);
    }

    #[test]
    fn test_inbound_from_unregistered_source_is_rejected() {
        let registry = registry();
        let mut ledger = InMemoryLedger::new();
        let mut bridge = bridge_on_b();

        // Right chain, wrong address.
        let err = bridge
            .on_message_received(
                &registry,
                &mut ledger,
                WIRE_A,
                BOB,
                TransportNonce(1),
                &[],
            )
            .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::UnauthorizedSource {
                chain: WIRE_A,
                address: BOB,
            }
        );

        // Unknown chain entirely.
        let err = bridge
            .on_message_received(
                &registry,
                &mut ledger,
                TransportChainId(7),
                BRIDGE_A,
                TransportNonce(1),
                &[],
            )
            .unwrap_err();
        assert!(matches!(err, ProtocolError::UnauthorizedSource { .. }));
    }

    #[test]
    fn test_inbound_malformed_payload_does_not_burn_the_nonce() {
        let registry = registry();
        let mut ledger = InMemoryLedger::new();
        let mut bridge = bridge_on_b();

        let err = bridge
            .on_message_received(
                &registry,
                &mut ledger,
                WIRE_A,
                BRIDGE_A,
                TransportNonce(1),
                b"definitely not rlp",
            )
            .unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedPayload(_)));
        assert!(!bridge.has_consumed(WIRE_A, TransportNonce(1)));

        // The same nonce still works once a valid payload shows up.
        let message = BridgeMessage {
            destination_chain_id: PROTO_B,
            collection: COLLECTION,
            from_owner: ALICE,
            to_owner: BOB,
            asset_id: U256::from(42),
            payload: Bytes::new(),
        };
        bridge
            .on_message_received(
                &registry,
                &mut ledger,
                WIRE_A,
                BRIDGE_A,
                TransportNonce(1),
                &message.to_bytes(),
            )
            .unwrap();
        assert!(bridge.has_consumed(WIRE_A, TransportNonce(1)));
    }

    #[test]
    fn test_inbound_addressed_to_another_chain_is_rejected() {
        let registry = registry();
        let mut ledger = InMemoryLedger::new();
        let mut bridge = bridge_on_b();

        let message = BridgeMessage {
            destination_chain_id: PROTO_A,
            collection: COLLECTION,
            from_owner: ALICE,
            to_owner: BOB,
            asset_id: U256::from(42),
            payload: Bytes::new(),
        };
        let err = bridge
            .on_message_received(
                &registry,
                &mut ledger,
                WIRE_A,
                BRIDGE_A,
                TransportNonce(1),
                &message.to_bytes(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::ChainMismatch {
                expected: PROTO_B.into(),
                got: PROTO_A.into(),
            }
        );
        assert!(!bridge.has_consumed(WIRE_A, TransportNonce(1)));
        assert_eq!(ledger.asset_count(), 0);
    }

    #[test]
    fn test_failed_mint_releases_the_nonce_for_retry() {
        let registry = registry();
        let mut ledger = InMemoryLedger::new();
        let mut bridge = bridge_on_b();

        // Asset id 42 already exists here, so the mint will collide.
        ledger
            .mint(COLLECTION, U256::from(42), ALICE, &Bytes::new())
            .unwrap();

        let message = BridgeMessage {
            destination_chain_id: PROTO_B,
            collection: COLLECTION,
            from_owner: ALICE,
            to_owner: BOB,
            asset_id: U256::from(42),
            payload: Bytes::new(),
        };
        let err = bridge
            .on_message_received(
                &registry,
                &mut ledger,
                WIRE_A,
                BRIDGE_A,
                TransportNonce(1),
                &message.to_bytes(),
            )
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Ledger(_)));
        assert!(!bridge.has_consumed(WIRE_A, TransportNonce(1)));
        assert!(bridge.transfers().is_empty());

        // Clear the collision and retry the same delivery.
        ledger.burn(COLLECTION, U256::from(42)).unwrap();
        bridge
            .on_message_received(
                &registry,
                &mut ledger,
                WIRE_A,
                BRIDGE_A,
                TransportNonce(1),
                &message.to_bytes(),
            )
            .unwrap();
        assert_eq!(ledger.owner_of(COLLECTION, U256::from(42)), Some(BOB));
    }

    // ── Wiring ─────────────────────────────────────────────────────────────

    #[test]
    fn test_remote_bridge_registration_is_admin_gated() {
        let mut bridge = HolographBridge::new(BRIDGE_A, ADMIN, CHAIN_A);

        let err = bridge.set_remote_bridge(BOB, WIRE_B, BRIDGE_B).unwrap_err();
        assert_eq!(err, ProtocolError::NotAdmin { caller: BOB });
        assert_eq!(bridge.remote_bridge(WIRE_B), None);

        bridge.set_remote_bridge(ADMIN, WIRE_B, BRIDGE_B).unwrap();
        assert_eq!(bridge.remote_bridge(WIRE_B), Some(BRIDGE_B));
        assert_eq!(
            bridge.events().last(),
            Some(&ProtocolEvent::RemoteBridgeSet {
                chain: WIRE_B,
                bridge: BRIDGE_B,
                by: ADMIN,
            })
        );
    }
}

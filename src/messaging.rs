//! Messaging transport seam for cross-chain delivery.
//!
//! The bridge hands an opaque payload to a [`MessagingModule`] and gets back
//! a [`TransportReceipt`] with the nonce the transport assigned. Delivery,
//! ordering and retries are the transport's problem; the bridge only relies
//! on the `(source chain, source address, nonce)` triple being unique, which
//! is what the replay guard keys on.
//!
//! [`LocalTransport`] is the in-process transport: it parks messages in
//! per-destination queues and lets the harness pump them with
//! [`LocalTransport::take_next`].

use std::collections::{HashMap, VecDeque};
use std::fmt;

use alloy_primitives::{Address, Bytes};
use thiserror::Error;
use tracing::debug;

use crate::registry::chains::TransportChainId;

/// Transport-assigned message sequence number, monotonically increasing per
/// `(source chain, source address)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransportNonce(pub u64);

impl fmt::Display for TransportNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Proof that the transport accepted an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportReceipt {
    pub nonce: TransportNonce,
    pub destination_chain: TransportChainId,
    pub destination_address: Address,
}

/// A message sitting in a transport queue, addressed but not yet delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlightMessage {
    pub source_chain: TransportChainId,
    pub source_address: Address,
    pub destination_chain: TransportChainId,
    pub destination_address: Address,
    pub nonce: TransportNonce,
    pub payload: Bytes,
}

/// Errors reported by a [`MessagingModule`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagingError {
    /// Transport refused to accept the message
    #[error("transport rejected the message: {0}")]
    SendFailed(String),
}

/// Outbound half of a cross-chain messaging layer.
pub trait MessagingModule {
    /// Queue `payload` for delivery and return the assigned nonce.
    fn send(
        &mut self,
        source_chain: TransportChainId,
        source_address: Address,
        destination_chain: TransportChainId,
        destination_address: Address,
        payload: Bytes,
    ) -> Result<TransportReceipt, MessagingError>;
}

/// In-process transport with per-destination FIFO queues.
#[derive(Debug, Clone, Default)]
pub struct LocalTransport {
    queues: HashMap<TransportChainId, VecDeque<InFlightMessage>>,
    next_nonce: HashMap<(TransportChainId, Address), u64>,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages queued for `chain` and not yet taken.
    pub fn pending(&self, chain: TransportChainId) -> usize {
        self.queues.get(&chain).map_or(0, VecDeque::len)
    }

    /// Messages in flight across all destinations.
    pub fn total_in_flight(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Pop the oldest message addressed to `chain`.
    pub fn take_next(&mut self, chain: TransportChainId) -> Option<InFlightMessage> {
        self.queues.get_mut(&chain)?.pop_front()
    }
}

impl MessagingModule for LocalTransport {
    fn send(
        &mut self,
        source_chain: TransportChainId,
        source_address: Address,
        destination_chain: TransportChainId,
        destination_address: Address,
        payload: Bytes,
    ) -> Result<TransportReceipt, MessagingError> {
        let counter = self
            .next_nonce
            .entry((source_chain, source_address))
            .or_insert(1);
        let nonce = TransportNonce(*counter);
        *counter += 1;

        debug!(
            target: "holograph::messaging",
            %source_chain,
            %destination_chain,
            %nonce,
            payload_len = payload.len(),
            "message queued"
        );

        self.queues
            .entry(destination_chain)
            .or_default()
            .push_back(InFlightMessage {
                source_chain,
                source_address,
                destination_chain,
                destination_address,
                nonce,
                payload,
            });

        Ok(TransportReceipt {
            nonce,
            destination_chain,
            destination_address,
        })
    }
}

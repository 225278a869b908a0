//! Wire format of bridge messages.
//!
//! A [`BridgeMessage`] is the unit the bridge hands to the transport: who
//! is moving which asset where. It is RLP-encoded on the wire; decoding is
//! strict, trailing bytes are rejected so a payload is either exactly one
//! message or garbage.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rlp::{Decodable, RlpDecodable, RlpEncodable};

use crate::registry::chains::ProtocolChainId;

/// One asset transfer crossing chains.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct BridgeMessage {
    /// Protocol chain id the transfer is addressed to. The receiving bridge
    /// checks this against its own chain before applying anything.
    pub destination_chain_id: ProtocolChainId,
    pub collection: Address,
    pub from_owner: Address,
    pub to_owner: Address,
    pub asset_id: U256,
    /// Application payload the ledger wants delivered with the asset.
    pub payload: Bytes,
}

impl BridgeMessage {
    /// RLP wire encoding.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from(alloy_rlp::encode(self))
    }

    /// Decode exactly one message from `buf`.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, alloy_rlp::Error> {
        let mut slice = buf;
        let message = Self::decode(&mut slice)?;
        if !slice.is_empty() {
            return Err(alloy_rlp::Error::UnexpectedLength);
        }
        Ok(message)
    }

    /// Content hash of the encoded message.
    pub fn message_hash(&self) -> B256 {
        keccak256(self.to_bytes())
    }
}

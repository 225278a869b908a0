//! Chain identifier spaces and the translation table between them.
//!
//! The protocol juggles three distinct id spaces for the same chain:
//!
//! ```text
//!   NativeChainId    u64   what the chain calls itself (EVM chain id)
//!   ProtocolChainId  u32   protocol-wide id carried inside configs and messages
//!   TransportChainId u16   compact id used by the messaging transport
//! ```
//!
//! They are deliberately separate newtypes so a value from one space can
//! never be passed where another is expected. [`ChainIdMap`] holds the
//! admin-installed rows tying the three together and answers lookups in
//! any direction. Lookups return `Option`: an unmapped id is a routing
//! dead end, never a silent passthrough.

use std::collections::HashMap;
use std::fmt;

use alloy_rlp::{BufMut, Decodable, Encodable};
use serde::{Deserialize, Serialize};

use crate::errors::ProtocolError;

/// Chain id in the chain's own numbering (EVM `chainid` opcode space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeChainId(pub u64);

/// Chain id in the protocol's own numbering. This is the value embedded in
/// deployment configs and bridge messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProtocolChainId(pub u32);

/// Chain id in the messaging transport's numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransportChainId(pub u16);

impl fmt::Display for NativeChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ProtocolChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TransportChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Bridge messages carry the destination protocol chain id on the wire.
impl Encodable for ProtocolChainId {
    fn encode(&self, out: &mut dyn BufMut) {
        self.0.encode(out);
    }

    fn length(&self) -> usize {
        self.0.length()
    }
}

impl Decodable for ProtocolChainId {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        u32::decode(buf).map(Self)
    }
}

/// The three id spaces a chain id can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainIdSpace {
    Native,
    Protocol,
    Transport,
}

impl fmt::Display for ChainIdSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Protocol => write!(f, "protocol"),
            Self::Transport => write!(f, "transport"),
        }
    }
}

/// A chain id tagged with the space it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainIdValue {
    Native(NativeChainId),
    Protocol(ProtocolChainId),
    Transport(TransportChainId),
}

impl ChainIdValue {
    /// The space this value belongs to.
    pub fn space(&self) -> ChainIdSpace {
        match self {
            Self::Native(_) => ChainIdSpace::Native,
            Self::Protocol(_) => ChainIdSpace::Protocol,
            Self::Transport(_) => ChainIdSpace::Transport,
        }
    }
}

impl fmt::Display for ChainIdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(id) => write!(f, "native chain {id}"),
            Self::Protocol(id) => write!(f, "protocol chain {id}"),
            Self::Transport(id) => write!(f, "transport chain {id}"),
        }
    }
}

impl From<NativeChainId> for ChainIdValue {
    fn from(id: NativeChainId) -> Self {
        Self::Native(id)
    }
}

impl From<ProtocolChainId> for ChainIdValue {
    fn from(id: ProtocolChainId) -> Self {
        Self::Protocol(id)
    }
}

impl From<TransportChainId> for ChainIdValue {
    fn from(id: TransportChainId) -> Self {
        Self::Transport(id)
    }
}

/// One chain described in all three id spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainIdRow {
    pub native: NativeChainId,
    pub protocol: ProtocolChainId,
    pub transport: TransportChainId,
}

impl ChainIdRow {
    pub const fn new(native: u64, protocol: u32, transport: u16) -> Self {
        Self {
            native: NativeChainId(native),
            protocol: ProtocolChainId(protocol),
            transport: TransportChainId(transport),
        }
    }

    /// The coordinate of this row living in `space`.
    pub fn value_in(&self, space: ChainIdSpace) -> ChainIdValue {
        match space {
            ChainIdSpace::Native => ChainIdValue::Native(self.native),
            ChainIdSpace::Protocol => ChainIdValue::Protocol(self.protocol),
            ChainIdSpace::Transport => ChainIdValue::Transport(self.transport),
        }
    }
}

/// Translation table between the three chain id spaces.
///
/// Rows form a partial bijection: every id appears in at most one row, so a
/// value in one space maps to at most one value in another. [`install`]
/// enforces this and rejects the whole batch on the first conflict.
///
/// [`install`]: ChainIdMap::install
#[derive(Debug, Clone, Default)]
pub struct ChainIdMap {
    rows: Vec<ChainIdRow>,
    by_native: HashMap<NativeChainId, usize>,
    by_protocol: HashMap<ProtocolChainId, usize>,
    by_transport: HashMap<TransportChainId, usize>,
}

impl ChainIdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of installed rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Installed rows in installation order.
    pub fn rows(&self) -> &[ChainIdRow] {
        &self.rows
    }

    /// Install a batch of rows. All-or-nothing: if any row conflicts with an
    /// installed row (or with another row in the batch) the map is left
    /// untouched. Rows identical to installed ones are accepted and skipped.
    ///
    /// Returns the number of rows actually added.
    pub fn install(&mut self, new_rows: &[ChainIdRow]) -> Result<usize, ProtocolError> {
        let mut staged = self.clone();
        let mut added = 0;
        for row in new_rows {
            if staged.insert_row(*row)? {
                added += 1;
            }
        }
        *self = staged;
        Ok(added)
    }

    fn insert_row(&mut self, row: ChainIdRow) -> Result<bool, ProtocolError> {
        let hits = [
            self.by_native
                .get(&row.native)
                .map(|i| (ChainIdValue::Native(row.native), *i)),
            self.by_protocol
                .get(&row.protocol)
                .map(|i| (ChainIdValue::Protocol(row.protocol), *i)),
            self.by_transport
                .get(&row.transport)
                .map(|i| (ChainIdValue::Transport(row.transport), *i)),
        ];

        let mut existing = None;
        for (value, index) in hits.into_iter().flatten() {
            if self.rows[index] != row {
                return Err(ProtocolError::MappingConflict { value });
            }
            existing = Some(index);
        }
        if existing.is_some() {
            return Ok(false);
        }

        let index = self.rows.len();
        self.rows.push(row);
        self.by_native.insert(row.native, index);
        self.by_protocol.insert(row.protocol, index);
        self.by_transport.insert(row.transport, index);
        Ok(true)
    }

    /// The row containing `value`, if any.
    pub fn row_for(&self, value: ChainIdValue) -> Option<&ChainIdRow> {
        let index = match value {
            ChainIdValue::Native(id) => self.by_native.get(&id),
            ChainIdValue::Protocol(id) => self.by_protocol.get(&id),
            ChainIdValue::Transport(id) => self.by_transport.get(&id),
        }?;
        self.rows.get(*index)
    }

    /// Translate `from` into the `to` space. `None` means `from` is unmapped.
    pub fn translate(&self, from: ChainIdValue, to: ChainIdSpace) -> Option<ChainIdValue> {
        self.row_for(from).map(|row| row.value_in(to))
    }

    pub fn native_to_protocol(&self, id: NativeChainId) -> Option<ProtocolChainId> {
        self.row_for(id.into()).map(|row| row.protocol)
    }

    pub fn native_to_transport(&self, id: NativeChainId) -> Option<TransportChainId> {
        self.row_for(id.into()).map(|row| row.transport)
    }

    pub fn protocol_to_transport(&self, id: ProtocolChainId) -> Option<TransportChainId> {
        self.row_for(id.into()).map(|row| row.transport)
    }

    pub fn transport_to_protocol(&self, id: TransportChainId) -> Option<ProtocolChainId> {
        self.row_for(id.into()).map(|row| row.protocol)
    }
}

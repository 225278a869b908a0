//! Asset ledger seam between the bridge and whatever holds token state.
//!
//! The bridge only needs four verbs: who owns an asset, mint it, burn it,
//! and move it. [`TokenLedger`] captures those so the bridge logic stays
//! independent of any particular token implementation. [`InMemoryLedger`]
//! is the in-process implementation used by the local chain harness and
//! the test suites.

use std::collections::HashMap;

use alloy_primitives::{Address, Bytes, U256};
use thiserror::Error;

/// Errors reported by a [`TokenLedger`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Minting an asset id that already exists in the collection
    #[error("asset {asset_id} already exists in collection {collection}")]
    AssetExists { collection: Address, asset_id: U256 },

    /// Acting on an asset id the collection does not hold
    #[error("asset {asset_id} does not exist in collection {collection}")]
    UnknownAsset { collection: Address, asset_id: U256 },
}

/// Ownership view and mutation verbs over bridgeable assets.
///
/// Assets are keyed by `(collection, asset_id)`. A burned asset ceases to
/// exist locally; the bridge carries its `payload` to the destination so a
/// later mint can restore it.
pub trait TokenLedger {
    /// Current holder of the asset, `None` if it does not exist here.
    fn owner_of(&self, collection: Address, asset_id: U256) -> Option<Address>;

    /// Create the asset for `owner`, attaching the carried `payload`.
    fn mint(
        &mut self,
        collection: Address,
        asset_id: U256,
        owner: Address,
        payload: &Bytes,
    ) -> Result<(), LedgerError>;

    /// Destroy the asset locally.
    fn burn(&mut self, collection: Address, asset_id: U256) -> Result<(), LedgerError>;

    /// Reassign the asset to `to`.
    fn transfer(&mut self, collection: Address, asset_id: U256, to: Address)
        -> Result<(), LedgerError>;

    /// Application payload to carry when the asset is bridged out.
    fn bridge_payload(&self, _collection: Address, _asset_id: U256) -> Bytes {
        Bytes::new()
    }
}

/// Process-local ledger backed by hash maps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    owners: HashMap<(Address, U256), Address>,
    payloads: HashMap<(Address, U256), Bytes>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of assets `owner` holds in `collection`.
    pub fn balance_of(&self, collection: Address, owner: Address) -> usize {
        self.owners
            .iter()
            .filter(|((c, _), o)| *c == collection && **o == owner)
            .count()
    }

    /// Total number of live assets across all collections.
    pub fn asset_count(&self) -> usize {
        self.owners.len()
    }
}

impl TokenLedger for InMemoryLedger {
    fn owner_of(&self, collection: Address, asset_id: U256) -> Option<Address> {
        self.owners.get(&(collection, asset_id)).copied()
    }

    fn mint(
        &mut self,
        collection: Address,
        asset_id: U256,
        owner: Address,
        payload: &Bytes,
    ) -> Result<(), LedgerError> {
        let key = (collection, asset_id);
        if self.owners.contains_key(&key) {
            return Err(LedgerError::AssetExists {
                collection,
                asset_id,
            });
        }
        self.owners.insert(key, owner);
        if !payload.is_empty() {
            self.payloads.insert(key, payload.clone());
        }
        Ok(())
    }

    fn burn(&mut self, collection: Address, asset_id: U256) -> Result<(), LedgerError> {
        let key = (collection, asset_id);
        if self.owners.remove(&key).is_none() {
            return Err(LedgerError::UnknownAsset {
                collection,
                asset_id,
            });
        }
        self.payloads.remove(&key);
        Ok(())
    }

    fn transfer(
        &mut self,
        collection: Address,
        asset_id: U256,
        to: Address,
    ) -> Result<(), LedgerError> {
        match self.owners.get_mut(&(collection, asset_id)) {
            Some(owner) => {
                *owner = to;
                Ok(())
            }
            None => Err(LedgerError::UnknownAsset {
                collection,
                asset_id,
            }),
        }
    }

    fn bridge_payload(&self, collection: Address, asset_id: U256) -> Bytes {
        self.payloads
            .get(&(collection, asset_id))
            .cloned()
            .unwrap_or_default()
    }
}

//! Holographable contract registry.
//!
//! The registry is the protocol's source of truth for three catalogs plus
//! the chain id translation table:
//!
//! ```text
//!   config hash  → deployed address    written only by the factory
//!   type tag     → canonical address   admin-managed, reservable
//!   chain id     ↔ chain id            three-space translation rows
//! ```
//!
//! Hash entries are write-once: a config hash maps to exactly one address,
//! forever. Type tag bindings are mutable but reservable, so the protocol
//! can pin canonical implementations while still letting fresh contracts
//! register themselves under unreserved tags. All privileged writes land
//! in the event log.

pub mod chains;

use std::collections::{HashMap, HashSet};

use alloy_primitives::{keccak256, Address, B256};
use tracing::{debug, warn};

use crate::environment::ExecutionEnvironment;
use crate::errors::ProtocolError;
use crate::events::{EventLog, ProtocolEvent};

use chains::{ChainIdMap, ChainIdRow, ChainIdSpace, ChainIdValue};

/// Type tag for a human-readable contract type name.
pub fn contract_type_tag(name: &str) -> B256 {
    keccak256(name.as_bytes())
}

/// Protocol-wide lookup of holographed contracts, contract types and chain
/// id mappings.
#[derive(Debug, Clone)]
pub struct HolographRegistry {
    admin: Address,
    /// Identity allowed to manage the reserved tag set and bind reserved
    /// tags. Defaults to the admin.
    reserved_owner: Address,
    factory: Address,
    holographed_hashes: HashMap<B256, Address>,
    holographed_addresses: HashSet<Address>,
    contract_types: HashMap<B256, Address>,
    reserved_types: HashSet<B256>,
    chain_ids: ChainIdMap,
    events: EventLog,
}

impl HolographRegistry {
    pub fn new(admin: Address, factory: Address) -> Self {
        Self {
            admin,
            reserved_owner: admin,
            factory,
            holographed_hashes: HashMap::new(),
            holographed_addresses: HashSet::new(),
            contract_types: HashMap::new(),
            reserved_types: HashSet::new(),
            chain_ids: ChainIdMap::new(),
            events: EventLog::new(),
        }
    }

    /// Hand the reserved tag vocabulary to a dedicated owner.
    pub fn with_reserved_owner(mut self, owner: Address) -> Self {
        self.reserved_owner = owner;
        self
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn reserved_owner(&self) -> Address {
        self.reserved_owner
    }

    pub fn factory_address(&self) -> Address {
        self.factory
    }

    // ── Holographed hash catalog ───────────────────────────────────────────

    /// Record `config_hash → address`. Only the registered factory may
    /// write, and a hash can never be re-pointed.
    pub fn set_holographed_hash_address(
        &mut self,
        caller: Address,
        config_hash: B256,
        address: Address,
    ) -> Result<(), ProtocolError> {
        if caller != self.factory {
            warn!(
                target: "holograph::registry",
                %caller,
                factory = %self.factory,
                "hash write from non-factory caller"
            );
            return Err(ProtocolError::NotFactory { caller });
        }
        if self.holographed_hashes.contains_key(&config_hash) {
            return Err(ProtocolError::AlreadyExists { config_hash });
        }

        self.holographed_hashes.insert(config_hash, address);
        self.holographed_addresses.insert(address);
        debug!(
            target: "holograph::registry",
            %address,
            %config_hash,
            "holographed hash recorded"
        );
        Ok(())
    }

    /// Deployed address for `config_hash`, if the factory recorded one.
    pub fn holographed_hash_address(&self, config_hash: B256) -> Option<Address> {
        self.holographed_hashes.get(&config_hash).copied()
    }

    pub fn is_holographed_hash_deployed(&self, config_hash: B256) -> bool {
        self.holographed_hashes.contains_key(&config_hash)
    }

    /// Whether `address` was deployed through the factory.
    pub fn is_holographed_contract(&self, address: Address) -> bool {
        self.holographed_addresses.contains(&address)
    }

    pub fn holographed_contract_count(&self) -> usize {
        self.holographed_hashes.len()
    }

    // ── Contract type catalog ──────────────────────────────────────────────

    /// Bind `tag → address` by authority: the reserved owner for reserved
    /// tags, the admin for everything else. Bindings are mutable.
    pub fn set_contract_type_address(
        &mut self,
        caller: Address,
        tag: B256,
        address: Address,
    ) -> Result<(), ProtocolError> {
        if self.reserved_types.contains(&tag) {
            if caller != self.reserved_owner {
                return Err(ProtocolError::ReservedType { tag });
            }
        } else if caller != self.admin {
            return Err(ProtocolError::NotAdmin { caller });
        }

        self.contract_types.insert(tag, address);
        self.events.record(ProtocolEvent::ContractTypeBound {
            tag,
            address,
            by: caller,
        });
        Ok(())
    }

    /// Canonical address bound to `tag`, if any.
    pub fn contract_type_address(&self, tag: B256) -> Option<Address> {
        self.contract_types.get(&tag).copied()
    }

    /// Add or remove tags from the reserved vocabulary.
    pub fn set_reserved_contract_types(
        &mut self,
        caller: Address,
        tags: &[B256],
        reserved: bool,
    ) -> Result<(), ProtocolError> {
        if caller != self.reserved_owner {
            return Err(ProtocolError::NotAdmin { caller });
        }

        for tag in tags {
            if reserved {
                self.reserved_types.insert(*tag);
            } else {
                self.reserved_types.remove(tag);
            }
        }
        self.events.record(ProtocolEvent::ReservedTypesChanged {
            tags: tags.to_vec(),
            reserved,
            by: caller,
        });
        Ok(())
    }

    pub fn is_reserved_type(&self, tag: B256) -> bool {
        self.reserved_types.contains(&tag)
    }

    /// Self-registration: bind the type tag the contract at `candidate`
    /// reports to `candidate` itself. Open to any caller because the tag is
    /// read from chain state, not from the request. Returns the bound tag.
    pub fn reference_contract_type_address<E: ExecutionEnvironment>(
        &mut self,
        env: &E,
        candidate: Address,
    ) -> Result<B256, ProtocolError> {
        let Some(tag) = env.contract_type_of(candidate) else {
            debug!(
                target: "holograph::registry",
                %candidate,
                "self-registration candidate has no code or no type tag"
            );
            return Err(ProtocolError::EmptyContract { address: candidate });
        };
        if self.reserved_types.contains(&tag) {
            return Err(ProtocolError::ReservedType { tag });
        }
        if self.contract_types.contains_key(&tag) {
            return Err(ProtocolError::AlreadyRegistered { tag });
        }

        self.contract_types.insert(tag, candidate);
        self.events.record(ProtocolEvent::ContractTypeBound {
            tag,
            address: candidate,
            by: candidate,
        });
        Ok(tag)
    }

    // ── Factory rotation ───────────────────────────────────────────────────

    /// Point the registry at a new factory. Admin only.
    pub fn set_factory(&mut self, caller: Address, factory: Address) -> Result<(), ProtocolError> {
        if caller != self.admin {
            return Err(ProtocolError::NotAdmin { caller });
        }

        let previous = self.factory;
        self.factory = factory;
        self.events.record(ProtocolEvent::FactoryChanged {
            previous,
            current: factory,
            by: caller,
        });
        Ok(())
    }

    // ── Chain id translation ───────────────────────────────────────────────

    /// Install chain id rows. Admin only; the whole batch is rejected on
    /// the first conflicting row.
    pub fn update_chain_id_maps(
        &mut self,
        caller: Address,
        rows: &[ChainIdRow],
    ) -> Result<usize, ProtocolError> {
        if caller != self.admin {
            return Err(ProtocolError::NotAdmin { caller });
        }

        let added = self.chain_ids.install(rows)?;
        self.events.record(ProtocolEvent::ChainIdRowsInstalled {
            rows: rows.to_vec(),
            by: caller,
        });
        Ok(added)
    }

    /// Translate a chain id into another space. `None` means unmapped.
    pub fn get_chain_id(&self, from: ChainIdValue, to: ChainIdSpace) -> Option<ChainIdValue> {
        self.chain_ids.translate(from, to)
    }

    /// Read access to the full translation table.
    pub fn chain_ids(&self) -> &ChainIdMap {
        &self.chain_ids
    }

    /// Audit log of privileged registry writes.
    pub fn events(&self) -> &EventLog {
        &self.events
    }
}

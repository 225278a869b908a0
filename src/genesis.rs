//! Genesis Deployer for Protocol Chains
//!
//! The genesis deployer is the permissioned front door for deterministic
//! deployment. An allowlist of approved identities may submit deployments;
//! the target address is derived purely from the deployer's own identity,
//! the salt and the bytecode hash, so the same inputs land on the same
//! address on every chain the deployer exists on.
//!
//! ```text
//!   deploy(chain_id, salt, bytecode, init_payload)
//!     ├─ caller on allowlist?            NotApproved
//!     ├─ chain_id == executing chain?    ChainMismatch
//!     ├─ derived address empty?          AlreadyDeployed
//!     └─ environment create + init       DeploymentFailed on abort
//! ```
//!
//! Approvals are themselves allowlist-gated and recorded in the event log.
//! The allowlist can never be emptied: revoking the last member fails with
//! `LastDeployer`, so the deployer cannot brick itself.

use std::collections::HashSet;

use alloy_primitives::{keccak256, Address, Bytes, B256};
use tracing::{debug, warn};

use crate::environment::{derive_deployment_address, EnvironmentError, ExecutionEnvironment};
use crate::errors::ProtocolError;
use crate::events::{EventLog, ProtocolEvent};
use crate::registry::chains::NativeChainId;

/// Allowlisted deterministic deployment authority.
#[derive(Debug, Clone)]
pub struct GenesisDeployer {
    /// Protocol address this deployer derives from. Identical on every
    /// chain, which is what makes derived addresses chain-invariant.
    address: Address,
    approved: HashSet<Address>,
    events: EventLog,
}

impl GenesisDeployer {
    /// Create a deployer seeded with one approved identity.
    pub fn new(address: Address, initial_deployer: Address) -> Self {
        let mut approved = HashSet::new();
        approved.insert(initial_deployer);
        Self {
            address,
            approved,
            events: EventLog::new(),
        }
    }

    /// The deployer's own protocol address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Whether `identity` may deploy through this component.
    pub fn is_approved_deployer(&self, identity: Address) -> bool {
        self.approved.contains(&identity)
    }

    /// Approved identities, sorted for stable output.
    pub fn approved_deployers(&self) -> Vec<Address> {
        let mut list: Vec<Address> = self.approved.iter().copied().collect();
        list.sort();
        list
    }

    /// Grant or revoke deploy permission for `identity`. Only approved
    /// identities may change the allowlist, and the last member cannot be
    /// revoked.
    pub fn approve_deployer(
        &mut self,
        caller: Address,
        identity: Address,
        approved: bool,
    ) -> Result<(), ProtocolError> {
        if !self.approved.contains(&caller) {
            return Err(ProtocolError::NotApproved { identity: caller });
        }
        if !approved && self.approved.contains(&identity) && self.approved.len() == 1 {
            return Err(ProtocolError::LastDeployer { identity });
        }

        if approved {
            self.approved.insert(identity);
        } else {
            self.approved.remove(&identity);
        }
        self.events.record(ProtocolEvent::DeployerApprovalChanged {
            identity,
            approved,
            by: caller,
        });
        Ok(())
    }

    /// Where a deployment with these inputs will land, on any chain.
    pub fn deployment_address(&self, salt: B256, bytecode_hash: B256) -> Address {
        derive_deployment_address(self.address, salt, bytecode_hash)
    }

    /// Deploy `bytecode` at its derived address and run its initializer.
    ///
    /// `chain_id` pins the request to one chain: a request signed for chain
    /// A replayed on chain B fails with `ChainMismatch` instead of silently
    /// deploying somewhere it was never meant for.
    pub fn deploy<E: ExecutionEnvironment>(
        &mut self,
        env: &mut E,
        caller: Address,
        chain_id: NativeChainId,
        salt: B256,
        bytecode: &Bytes,
        init_payload: &Bytes,
    ) -> Result<Address, ProtocolError> {
        if !self.approved.contains(&caller) {
            warn!(
                target: "holograph::genesis",
                %caller,
                "deploy attempt by unapproved identity"
            );
            return Err(ProtocolError::NotApproved { identity: caller });
        }

        let local = env.native_chain_id();
        if chain_id != local {
            return Err(ProtocolError::ChainMismatch {
                expected: local.into(),
                got: chain_id.into(),
            });
        }

        let target = self.deployment_address(salt, keccak256(bytecode));
        if env.has_code(target) {
            return Err(ProtocolError::AlreadyDeployed { address: target });
        }

        let deployed = env
            .deploy(self.address, salt, bytecode, init_payload)
            .map_err(|err| match err {
                EnvironmentError::AddressOccupied(address) => {
                    ProtocolError::AlreadyDeployed { address }
                }
                EnvironmentError::CreationFailed(msg) => ProtocolError::DeploymentFailed(msg),
            })?;

        debug!(
            target: "holograph::genesis",
            address = %deployed,
            %caller,
            "contract deployed"
        );
        Ok(deployed)
    }

    /// Audit log of allowlist changes.
    pub fn events(&self) -> &EventLog {
        &self.events
    }
}

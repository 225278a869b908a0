//! Execution environment seam: code presence, deployment, chain identity.
//!
//! Deployment components never touch chain state directly. They go through
//! [`ExecutionEnvironment`], which answers three questions (what chain am I
//! on, is there code at this address, what kind of code) and performs the
//! one mutation the protocol needs: an atomic create-and-initialize at a
//! derived address. [`InMemoryEnvironment`] is the in-process
//! implementation backing the local chain harness and the test suites.
//!
//! ```text
//!   GenesisDeployer / HolographFactory
//!     → ExecutionEnvironment        (this module, trait)
//!       → InMemoryEnvironment       (hash-map chain state)
//! ```
//!
//! Convention: the first 32 bytes of a contract's bytecode are its type tag,
//! standing in for a deployed contract reporting its own type.

use std::collections::HashMap;

use alloy_primitives::{keccak256, Address, Bytes, B256};
use thiserror::Error;
use tracing::debug;

use crate::registry::chains::NativeChainId;

/// Errors reported by an [`ExecutionEnvironment`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentError {
    /// Derived address already holds code
    #[error("address {0} is already occupied")]
    AddressOccupied(Address),

    /// Contract creation or initialization aborted
    #[error("contract creation failed: {0}")]
    CreationFailed(String),
}

/// Content-addressed deployment rule: the target address is a pure function
/// of the deploying identity, the salt and the bytecode hash. Any party can
/// precompute where a deployment will land, on any chain.
pub fn derive_deployment_address(deployer: Address, salt: B256, bytecode_hash: B256) -> Address {
    deployer.create2(salt, bytecode_hash)
}

/// Build bytecode whose leading 32 bytes carry `contract_type`.
pub fn type_tagged_bytecode(contract_type: B256, body: &[u8]) -> Bytes {
    let mut code = Vec::with_capacity(32 + body.len());
    code.extend_from_slice(contract_type.as_slice());
    code.extend_from_slice(body);
    Bytes::from(code)
}

/// Chain state as seen by the deployment components.
pub trait ExecutionEnvironment {
    /// Chain id of the executing chain, in its own numbering.
    fn native_chain_id(&self) -> NativeChainId;

    /// Whether `address` holds contract code.
    fn has_code(&self, address: Address) -> bool;

    /// Hash of the code at `address`, `None` for empty accounts.
    fn code_hash(&self, address: Address) -> Option<B256>;

    /// Type tag reported by the contract at `address`, `None` if there is
    /// no code or the code carries no tag.
    fn contract_type_of(&self, address: Address) -> Option<B256>;

    /// Create the contract at its derived address and run its initializer
    /// with `init_payload`, as one atomic step. Nothing is written on error.
    fn deploy(
        &mut self,
        deployer: Address,
        salt: B256,
        bytecode: &Bytes,
        init_payload: &Bytes,
    ) -> Result<Address, EnvironmentError>;
}

/// A contract account held by [`InMemoryEnvironment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub bytecode: Bytes,
    pub bytecode_hash: B256,
    pub init_payload: Bytes,
}

impl DeployedContract {
    fn contract_type(&self) -> Option<B256> {
        if self.bytecode.len() < 32 {
            return None;
        }
        Some(B256::from_slice(&self.bytecode[..32]))
    }
}

/// Process-local chain state backed by a hash map.
#[derive(Debug, Clone)]
pub struct InMemoryEnvironment {
    chain_id: NativeChainId,
    contracts: HashMap<Address, DeployedContract>,
}

impl InMemoryEnvironment {
    pub fn new(chain_id: NativeChainId) -> Self {
        Self {
            chain_id,
            contracts: HashMap::new(),
        }
    }

    /// Place `bytecode` at a pre-assigned address, bypassing derivation.
    /// This is how genesis-allocated protocol contracts get their code.
    pub fn install_code(&mut self, address: Address, bytecode: Bytes) {
        let bytecode_hash = keccak256(&bytecode);
        self.contracts.insert(
            address,
            DeployedContract {
                bytecode,
                bytecode_hash,
                init_payload: Bytes::new(),
            },
        );
    }

    /// The contract record at `address`, if any.
    pub fn contract(&self, address: Address) -> Option<&DeployedContract> {
        self.contracts.get(&address)
    }

    /// Number of contract accounts.
    pub fn contract_count(&self) -> usize {
        self.contracts.len()
    }
}

impl ExecutionEnvironment for InMemoryEnvironment {
    fn native_chain_id(&self) -> NativeChainId {
        self.chain_id
    }

    fn has_code(&self, address: Address) -> bool {
        self.contracts.contains_key(&address)
    }

    fn code_hash(&self, address: Address) -> Option<B256> {
        self.contracts.get(&address).map(|c| c.bytecode_hash)
    }

    fn contract_type_of(&self, address: Address) -> Option<B256> {
        self.contracts.get(&address)?.contract_type()
    }

    fn deploy(
        &mut self,
        deployer: Address,
        salt: B256,
        bytecode: &Bytes,
        init_payload: &Bytes,
    ) -> Result<Address, EnvironmentError> {
        if bytecode.is_empty() {
            return Err(EnvironmentError::CreationFailed(
                "empty bytecode".to_string(),
            ));
        }

        let bytecode_hash = keccak256(bytecode);
        let address = derive_deployment_address(deployer, salt, bytecode_hash);
        if self.contracts.contains_key(&address) {
            return Err(EnvironmentError::AddressOccupied(address));
        }

        self.contracts.insert(
            address,
            DeployedContract {
                bytecode: bytecode.clone(),
                bytecode_hash,
                init_payload: init_payload.clone(),
            },
        );

        debug!(
            target: "holograph::environment",
            %address,
            %deployer,
            code_len = bytecode.len(),
            "contract created"
        );
        Ok(address)
    }
}

//! Holographable contract factory.
//!
//! The factory turns a signed [`DeploymentConfig`] into a deployed contract
//! and a registry entry, with no allowlist in the way: possession of a
//! valid signature from the config's signer is the whole permission model.
//!
//! ```text
//!   deploy_holographable_contract(request, bytecode, init_payload)
//!     ├─ claim == config.signer, signature recovers to it   InvalidSignature
//!     ├─ registry still points at this factory              NotFactory
//!     ├─ config hash not yet deployed                       AlreadyDeployed
//!     ├─ artifacts match the hashes the signer signed       HashMismatch
//!     ├─ environment create + init                          DeploymentFailed
//!     └─ registry write + deployed event
//! ```
//!
//! The derived address depends only on the factory identity, the salt and
//! the bytecode hash. There is deliberately no chain id gate: the same
//! signed config submitted on any chain lands on the same address, which
//! is what makes the contracts holographic.
//!
//! [`DeploymentConfig`]: crate::config::DeploymentConfig

use alloy_primitives::{keccak256, Address, Bytes, B256};
use tracing::{debug, info};

use crate::config::{verify_config_signature, SignedDeploymentRequest};
use crate::environment::{derive_deployment_address, EnvironmentError, ExecutionEnvironment};
use crate::errors::ProtocolError;
use crate::events::{EventLog, ProtocolEvent};
use crate::registry::HolographRegistry;

/// Outcome of a successful factory deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedContractInfo {
    pub address: Address,
    pub config_hash: B256,
}

/// Signature-gated deterministic deployer of holographable contracts.
#[derive(Debug, Clone)]
pub struct HolographFactory {
    /// Protocol address the factory derives from, identical on every chain.
    address: Address,
    events: EventLog,
}

impl HolographFactory {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            events: EventLog::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Where a deployment with these inputs will land, on any chain.
    pub fn deployment_address(&self, salt: B256, bytecode_hash: B256) -> Address {
        derive_deployment_address(self.address, salt, bytecode_hash)
    }

    /// Deploy the contract a signed config describes and record its hash in
    /// the registry. Exactly one deployment per config hash ever succeeds.
    pub fn deploy_holographable_contract<E: ExecutionEnvironment>(
        &mut self,
        env: &mut E,
        registry: &mut HolographRegistry,
        request: &SignedDeploymentRequest,
        bytecode: &Bytes,
        init_payload: &Bytes,
    ) -> Result<DeployedContractInfo, ProtocolError> {
        let config = &request.config;
        let config_hash = config.config_hash();

        if request.signer_claim != config.signer {
            debug!(
                target: "holograph::factory",
                claim = %request.signer_claim,
                signer = %config.signer,
                "signer claim does not match config"
            );
            return Err(ProtocolError::InvalidSignature { config_hash });
        }
        verify_config_signature(config_hash, &request.signature, request.signer_claim)?;

        // The registry write after deployment must not be refusable, so the
        // wiring is checked up front.
        if registry.factory_address() != self.address {
            return Err(ProtocolError::NotFactory {
                caller: self.address,
            });
        }

        if let Some(address) = registry.holographed_hash_address(config_hash) {
            return Err(ProtocolError::AlreadyDeployed { address });
        }

        let bytecode_hash = keccak256(bytecode);
        if bytecode_hash != config.bytecode_hash {
            return Err(ProtocolError::HashMismatch {
                artifact: "bytecode",
                expected: config.bytecode_hash,
                got: bytecode_hash,
            });
        }
        let init_payload_hash = keccak256(init_payload);
        if init_payload_hash != config.init_payload_hash {
            return Err(ProtocolError::HashMismatch {
                artifact: "init payload",
                expected: config.init_payload_hash,
                got: init_payload_hash,
            });
        }

        let target = self.deployment_address(config.salt, bytecode_hash);
        if env.has_code(target) {
            return Err(ProtocolError::AlreadyDeployed { address: target });
        }

        let address = env
            .deploy(self.address, config.salt, bytecode, init_payload)
            .map_err(|err| match err {
                EnvironmentError::AddressOccupied(address) => {
                    ProtocolError::AlreadyDeployed { address }
                }
                EnvironmentError::CreationFailed(msg) => ProtocolError::DeploymentFailed(msg),
            })?;

        registry.set_holographed_hash_address(self.address, config_hash, address)?;
        self.events.record(ProtocolEvent::HolographableContractDeployed {
            address,
            config_hash,
        });
        info!(
            target: "holograph::factory",
            %address,
            %config_hash,
            signer = %config.signer,
            "holographable contract deployed"
        );

        Ok(DeployedContractInfo {
            address,
            config_hash,
        })
    }

    /// Audit log of factory deployments.
    pub fn events(&self) -> &EventLog {
        &self.events
    }
}

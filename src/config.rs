//! Deployment configs and the content hash that identifies them.
//!
//! A [`DeploymentConfig`] pins down everything that determines a deployment:
//! what kind of contract, which chain it originates from, the salt, the
//! artifact hashes and who vouches for it. Its [`config_hash`] is the
//! protocol-wide identity of the deployment, hashed over a fixed-width
//! packing so every chain derives the same value:
//!
//! ```text
//!   keccak256(
//!     contract_type     32 bytes
//!     origin_chain_id    4 bytes (big-endian u32, protocol space)
//!     salt              32 bytes
//!     bytecode_hash     32 bytes
//!     init_payload_hash 32 bytes
//!     signer            20 bytes
//!   )
//! ```
//!
//! [`config_hash`]: DeploymentConfig::config_hash

use alloy_primitives::{keccak256, Address, Bytes, Keccak256, Signature, B256};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::SALT_ENTROPY_LENGTH;
use crate::errors::ProtocolError;
use crate::registry::chains::ProtocolChainId;

/// Everything that determines a deterministic deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    /// Type tag of the contract being deployed.
    pub contract_type: B256,
    /// Protocol chain id of the chain the original asset lives on. Part of
    /// the hash, never a deploy gate: the same config must produce the same
    /// address on every chain it is submitted to.
    pub origin_chain_id: ProtocolChainId,
    /// Caller-supplied salt, see [`salt_from_entropy`].
    pub salt: B256,
    /// keccak256 of the contract bytecode.
    pub bytecode_hash: B256,
    /// keccak256 of the initializer payload.
    pub init_payload_hash: B256,
    /// Identity that signs off on this config.
    pub signer: Address,
}

impl DeploymentConfig {
    /// Build a config from already-computed artifact hashes.
    pub fn new(
        contract_type: B256,
        origin_chain_id: ProtocolChainId,
        salt: B256,
        bytecode_hash: B256,
        init_payload_hash: B256,
        signer: Address,
    ) -> Self {
        Self {
            contract_type,
            origin_chain_id,
            salt,
            bytecode_hash,
            init_payload_hash,
            signer,
        }
    }

    /// Build a config by hashing the artifacts directly.
    pub fn from_artifacts(
        contract_type: B256,
        origin_chain_id: ProtocolChainId,
        salt: B256,
        bytecode: &Bytes,
        init_payload: &Bytes,
        signer: Address,
    ) -> Self {
        Self {
            contract_type,
            origin_chain_id,
            salt,
            bytecode_hash: keccak256(bytecode),
            init_payload_hash: keccak256(init_payload),
            signer,
        }
    }

    /// Content hash identifying this deployment protocol-wide.
    pub fn config_hash(&self) -> B256 {
        let mut hasher = Keccak256::new();
        hasher.update(self.contract_type);
        hasher.update(self.origin_chain_id.0.to_be_bytes());
        hasher.update(self.salt);
        hasher.update(self.bytecode_hash);
        hasher.update(self.init_payload_hash);
        hasher.update(self.signer);
        hasher.finalize()
    }
}

/// A deployment config plus the signature that authorizes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedDeploymentRequest {
    pub config: DeploymentConfig,
    pub signature: Signature,
    /// Identity the submitter claims signed the config. Has to match both
    /// `config.signer` and the address the signature recovers to.
    pub signer_claim: Address,
}

/// Compose a salt from 12 caller-chosen entropy bytes, zero-padded to 32.
/// Only the leading [`SALT_ENTROPY_LENGTH`] bytes of a salt carry meaning.
pub fn salt_from_entropy(entropy: [u8; SALT_ENTROPY_LENGTH]) -> B256 {
    let mut salt = [0u8; 32];
    salt[..SALT_ENTROPY_LENGTH].copy_from_slice(&entropy);
    B256::from(salt)
}

/// Check that `signature` is a valid ECDSA signature over `config_hash`
/// recovering to `expected_signer`.
pub fn verify_config_signature(
    config_hash: B256,
    signature: &Signature,
    expected_signer: Address,
) -> Result<(), ProtocolError> {
    let recovered = match signature.recover_address_from_prehash(&config_hash) {
        Ok(address) => address,
        Err(err) => {
            debug!(
                target: "holograph::config",
                %config_hash,
                %err,
                "signature recovery failed"
            );
            return Err(ProtocolError::InvalidSignature { config_hash });
        }
    };

    if recovered != expected_signer {
        debug!(
            target: "holograph::config",
            %config_hash,
            %recovered,
            %expected_signer,
            "recovered signer does not match config signer"
        );
        return Err(ProtocolError::InvalidSignature { config_hash });
    }

    Ok(())
}

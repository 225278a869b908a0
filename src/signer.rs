//! Config Signer Implementation
//!
//! This module provides utilities for signing deployment configs, including:
//! - Key management for config signers
//! - Config sealing (signing)
//! - Signature byte encoding (r || s || v)

use alloy_primitives::{Address, Signature, B256};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::{DeploymentConfig, SignedDeploymentRequest};
use crate::constants::SIGNATURE_LENGTH;

/// Errors that can occur during signing operations
#[derive(Debug, Error)]
pub enum SignerError {
    /// No signing key available for the specified address
    #[error("No signer available for address {0}")]
    NoSignerForAddress(Address),

    /// Signing operation failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Invalid private key format
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signature bytes are not a valid r || s || v encoding
    #[error("Invalid signature bytes: {0}")]
    InvalidSignatureBytes(String),
}

/// Manages signing keys for deployment config signers
#[derive(Debug)]
pub struct SignerManager {
    /// Map of address to signer
    signers: RwLock<HashMap<Address, PrivateKeySigner>>,
}

impl SignerManager {
    /// Create a new signer manager
    pub fn new() -> Self {
        Self { signers: RwLock::new(HashMap::new()) }
    }

    /// Add a signer from a private key hex string
    pub async fn add_signer_from_hex(&self, private_key_hex: &str) -> Result<Address, SignerError> {
        let signer = private_key_hex
            .parse::<PrivateKeySigner>()
            .map_err(|_| SignerError::InvalidPrivateKey)?;

        let address = signer.address();
        self.signers.write().await.insert(address, signer);

        Ok(address)
    }

    /// Add a signer directly
    pub async fn add_signer(&self, signer: PrivateKeySigner) -> Address {
        let address = signer.address();
        self.signers.write().await.insert(address, signer);
        address
    }

    /// Check if we have a signer for the given address
    pub async fn has_signer(&self, address: &Address) -> bool {
        self.signers.read().await.contains_key(address)
    }

    /// Get all registered signer addresses
    pub async fn signer_addresses(&self) -> Vec<Address> {
        self.signers.read().await.keys().copied().collect()
    }

    /// Sign a message hash with the specified signer
    pub async fn sign_hash(
        &self,
        address: &Address,
        hash: B256,
    ) -> Result<Signature, SignerError> {
        let signers = self.signers.read().await;
        let signer =
            signers.get(address).ok_or_else(|| SignerError::NoSignerForAddress(*address))?;

        signer
            .sign_hash(&hash)
            .await
            .map_err(|e| SignerError::SigningFailed(e.to_string()))
    }

    /// Remove a signer
    pub async fn remove_signer(&self, address: &Address) -> bool {
        self.signers.write().await.remove(address).is_some()
    }
}

impl Default for SignerManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns deployment configs into signed deployment requests
#[derive(Debug)]
pub struct ConfigSealer {
    signer_manager: Arc<SignerManager>,
}

impl ConfigSealer {
    /// Create a new config sealer
    pub fn new(signer_manager: Arc<SignerManager>) -> Self {
        Self { signer_manager }
    }

    /// Sign `config` with the key of the signer it names and wrap the
    /// result into a request the factory accepts.
    pub async fn seal_config(
        &self,
        config: &DeploymentConfig,
    ) -> Result<SignedDeploymentRequest, SignerError> {
        let config_hash = config.config_hash();
        let signature = self.signer_manager.sign_hash(&config.signer, config_hash).await?;

        Ok(SignedDeploymentRequest {
            config: config.clone(),
            signature,
            signer_claim: config.signer,
        })
    }
}

/// Convert a signature to bytes (r || s || v)
pub fn signature_to_bytes(sig: &Signature) -> [u8; SIGNATURE_LENGTH] {
    let mut bytes = [0u8; SIGNATURE_LENGTH];
    bytes[..32].copy_from_slice(&sig.r().to_be_bytes::<32>());
    bytes[32..64].copy_from_slice(&sig.s().to_be_bytes::<32>());
    bytes[64] = sig.v() as u8;
    bytes
}

/// Convert bytes to a signature
pub fn bytes_to_signature(bytes: &[u8]) -> Result<Signature, SignerError> {
    if bytes.len() != SIGNATURE_LENGTH {
        return Err(SignerError::InvalidSignatureBytes(format!(
            "expected {} bytes, got {}",
            SIGNATURE_LENGTH,
            bytes.len()
        )));
    }

    Signature::try_from(bytes).map_err(|e| SignerError::InvalidSignatureBytes(e.to_string()))
}

/// Development signer setup with known test keys
pub mod dev {
    use super::*;

    /// Private keys for the dev accounts (from "test test..." mnemonic)
    pub const DEV_PRIVATE_KEYS: &[&str] = &[
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
        "5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
        "7c852118294e51e653712a81e05800f419141751be58f605c371e15141b007a6",
        "47e179ec197488593b187f80a00eb0da91f1b9d0b13f8733639f19c30a34926a",
        "8b3a350cf5c34c9194ca85829a2df0ec3153be0318b5e2d3348e872092edffba",
    ];

    /// Set up the signer manager with dev keys
    pub async fn setup_dev_signers() -> Arc<SignerManager> {
        let manager = Arc::new(SignerManager::new());

        for key in DEV_PRIVATE_KEYS.iter().take(3) {
            // Use first 3 as default signers
            manager
                .add_signer_from_hex(key)
                .await
                .expect("Dev keys should be valid");
        }

        manager
    }

    /// Get a dev signer by index for testing
    pub fn dev_signer(index: usize) -> PrivateKeySigner {
        DEV_PRIVATE_KEYS[index]
            .parse()
            .expect("Dev keys should be valid")
    }

    /// Addresses of all dev accounts, in key order
    pub fn dev_accounts() -> Vec<Address> {
        DEV_PRIVATE_KEYS.iter().map(|key| dev_signer_from(key).address()).collect()
    }

    fn dev_signer_from(key: &str) -> PrivateKeySigner {
        key.parse().expect("Dev keys should be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::verify_config_signature;
    use crate::registry::chains::ProtocolChainId;
    use alloy_primitives::{b256, Bytes};

    fn config_for(signer: Address) -> DeploymentConfig {
        DeploymentConfig::from_artifacts(
            b256!("00000000000000000000000000000000000000000000000000000000000000AB"),
            ProtocolChainId(4001),
            b256!("0000000000000000000000000000000000000000000000000000000000001234"),
            &Bytes::from_static(b"bytecode"),
            &Bytes::from_static(b"init"),
            signer,
        )
    }

    #[tokio::test]
    async fn test_signer_manager() {
        let manager = SignerManager::new();

        // Add a dev signer
        let address = manager
            .add_signer_from_hex(dev::DEV_PRIVATE_KEYS[0])
            .await
            .unwrap();

        assert!(manager.has_signer(&address).await);
        assert_eq!(manager.signer_addresses().await.len(), 1);
    }

    #[tokio::test]
    async fn test_seal_and_verify_config() {
        let manager = Arc::new(SignerManager::new());
        let address = manager
            .add_signer_from_hex(dev::DEV_PRIVATE_KEYS[0])
            .await
            .unwrap();

        let sealer = ConfigSealer::new(manager);
        let config = config_for(address);

        let request = sealer.seal_config(&config).await.unwrap();
        assert_eq!(request.signer_claim, address);
        verify_config_signature(config.config_hash(), &request.signature, address).unwrap();
    }

    #[tokio::test]
    async fn test_seal_config_without_key_fails() {
        let sealer = ConfigSealer::new(Arc::new(SignerManager::new()));
        let config = config_for(dev::dev_accounts()[0]);

        let result = sealer.seal_config(&config).await;
        match result.unwrap_err() {
            SignerError::NoSignerForAddress(addr) => assert_eq!(addr, config.signer),
            other => panic!("Expected NoSignerForAddress, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dev_signers_setup() {
        let manager = dev::setup_dev_signers().await;
        let addresses = manager.signer_addresses().await;

        assert_eq!(addresses.len(), 3);

        // Verify addresses match expected dev accounts
        let expected_first = dev::dev_accounts()[0];
        assert!(addresses.contains(&expected_first));
    }

    #[tokio::test]
    async fn test_remove_signer() {
        let manager = SignerManager::new();
        let address = manager
            .add_signer_from_hex(dev::DEV_PRIVATE_KEYS[0])
            .await
            .unwrap();

        assert!(manager.has_signer(&address).await);
        assert!(manager.remove_signer(&address).await);
        assert!(!manager.has_signer(&address).await);
        // Removing again should return false
        assert!(!manager.remove_signer(&address).await);
    }

    #[tokio::test]
    async fn test_sign_hash_nonexistent_address() {
        let manager = SignerManager::new();
        let fake_addr: Address = "0x0000000000000000000000000000000000000099".parse().unwrap();
        let hash = B256::ZERO;

        let result = manager.sign_hash(&fake_addr, hash).await;
        assert!(result.is_err());
        match result.unwrap_err() {
            SignerError::NoSignerForAddress(addr) => assert_eq!(addr, fake_addr),
            other => panic!("Expected NoSignerForAddress, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_signer_invalid_key() {
        let manager = SignerManager::new();
        let result = manager.add_signer_from_hex("not_a_valid_hex_key").await;
        assert!(result.is_err());
        match result.unwrap_err() {
            SignerError::InvalidPrivateKey => {}
            other => panic!("Expected InvalidPrivateKey, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_different_signers_produce_different_signatures() {
        let manager = Arc::new(SignerManager::new());
        let addr1 = manager.add_signer_from_hex(dev::DEV_PRIVATE_KEYS[0]).await.unwrap();
        let addr2 = manager.add_signer_from_hex(dev::DEV_PRIVATE_KEYS[1]).await.unwrap();

        let sealer = ConfigSealer::new(manager);

        let first = sealer.seal_config(&config_for(addr1)).await.unwrap();
        let second = sealer.seal_config(&config_for(addr2)).await.unwrap();

        // Different signers should produce different signatures
        assert_ne!(
            signature_to_bytes(&first.signature),
            signature_to_bytes(&second.signature)
        );

        // But both should verify against their own config
        verify_config_signature(first.config.config_hash(), &first.signature, addr1).unwrap();
        verify_config_signature(second.config.config_hash(), &second.signature, addr2).unwrap();
    }

    #[tokio::test]
    async fn test_signature_bytes_roundtrip() {
        let manager = Arc::new(SignerManager::new());
        let address = manager.add_signer_from_hex(dev::DEV_PRIVATE_KEYS[0]).await.unwrap();
        let signature = manager.sign_hash(&address, B256::ZERO).await.unwrap();

        let bytes = signature_to_bytes(&signature);
        let back = bytes_to_signature(&bytes).unwrap();
        assert_eq!(signature_to_bytes(&back), bytes);
    }

    #[test]
    fn test_bytes_to_signature_wrong_length() {
        let result = bytes_to_signature(&[0u8; 10]);
        match result.unwrap_err() {
            SignerError::InvalidSignatureBytes(msg) => assert!(msg.contains("got 10")),
            other => panic!("Expected InvalidSignatureBytes, got {:?}", other),
        }
    }

    #[test]
    fn test_dev_signer_matches_dev_account() {
        let signer = dev::dev_signer(0);
        let expected_addr = dev::dev_accounts()[0];
        assert_eq!(signer.address(), expected_addr);
    }

    #[tokio::test]
    async fn test_signer_manager_default_is_empty() {
        let manager = SignerManager::default();
        assert!(manager.signer_addresses().await.is_empty());
    }
}

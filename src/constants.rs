use alloy_primitives::{address, Address};

/// Genesis deployer protocol address (deterministic, pre-assigned)
pub const GENESIS_DEPLOYER_ADDRESS: Address = address!("00000000000000000000000000000000DE910E00");
/// Registry protocol address (deterministic, pre-assigned)
pub const REGISTRY_ADDRESS: Address = address!("000000000000000000000000000000004E615700");
/// Factory protocol address (deterministic, pre-assigned)
pub const FACTORY_ADDRESS: Address = address!("00000000000000000000000000000000FAC70400");
/// Bridge protocol address (deterministic, pre-assigned)
pub const BRIDGE_ADDRESS: Address = address!("00000000000000000000000000000000B41D6E00");

/// Caller-chosen entropy length inside a deployment salt (bytes)
pub const SALT_ENTROPY_LENGTH: usize = 12;
/// ECDSA signature length (65 bytes: r=32, s=32, v=1)
pub const SIGNATURE_LENGTH: usize = 65;
/// Default native chain id for local development chains
pub const DEFAULT_CHAIN_ID: u64 = 1338;

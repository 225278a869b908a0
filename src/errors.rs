//! Protocol-wide error taxonomy.
//!
//! Every permissioned surface (deployer, registry, factory, bridge) reports
//! failures through [`ProtocolError`] so callers and tests can match on one
//! set of variants. Trait seams keep their own small error types
//! ([`LedgerError`], [`EnvironmentError`], [`MessagingError`]) and the
//! components translate those into the taxonomy at the call site.
//!
//! [`EnvironmentError`]: crate::environment::EnvironmentError
//! [`MessagingError`]: crate::messaging::MessagingError

use alloy_primitives::{Address, B256, U256};
use thiserror::Error;

use crate::messaging::TransportNonce;
use crate::registry::chains::{ChainIdValue, TransportChainId};
use crate::token::LedgerError;

/// Errors produced by the deployment and bridge surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Caller is not on the deployer allowlist
    #[error("identity {identity} is not an approved deployer")]
    NotApproved { identity: Address },

    /// A chain id embedded in a request does not match the executing chain
    #[error("chain id mismatch: expected {expected}, got {got}")]
    ChainMismatch {
        expected: ChainIdValue,
        got: ChainIdValue,
    },

    /// Target address (or config hash) already has a deployment
    #[error("already deployed at {address}")]
    AlreadyDeployed { address: Address },

    /// The execution environment refused or aborted the deployment
    #[error("deployment failed: {0}")]
    DeploymentFailed(String),

    /// Signature does not recover to the signer named in the config
    #[error("invalid signature over config hash {config_hash}")]
    InvalidSignature { config_hash: B256 },

    /// Caller is not the registered factory
    #[error("caller {caller} is not the registered factory")]
    NotFactory { caller: Address },

    /// Config hash already has a registry entry
    #[error("config hash {config_hash} already has a registry entry")]
    AlreadyExists { config_hash: B256 },

    /// Contract type tag is already bound to an address
    #[error("contract type {tag} is already registered")]
    AlreadyRegistered { tag: B256 },

    /// Contract type tag is reserved and the caller may not bind it
    #[error("contract type {tag} is reserved")]
    ReservedType { tag: B256 },

    /// Claimed holder does not own the asset
    #[error("{claimed} does not own asset {asset_id} in collection {collection}")]
    NotOwner {
        collection: Address,
        asset_id: U256,
        claimed: Address,
    },

    /// No translation row or no counterpart bridge for this chain id
    #[error("no route for {chain}")]
    UnknownDestination { chain: ChainIdValue },

    /// Inbound message does not come from the registered counterpart bridge
    #[error("unauthorized message source {address} on transport chain {chain}")]
    UnauthorizedSource {
        chain: TransportChainId,
        address: Address,
    },

    /// Transport nonce was already consumed for this source chain
    #[error("message nonce {nonce} from transport chain {chain} was already applied")]
    Replayed {
        chain: TransportChainId,
        nonce: TransportNonce,
    },

    /// Address holds no code (or no readable contract type)
    #[error("no contract code at {address}")]
    EmptyContract { address: Address },

    /// Caller is not the protocol admin
    #[error("caller {caller} is not the admin")]
    NotAdmin { caller: Address },

    /// Removing this identity would leave the deployer allowlist empty
    #[error("removing {identity} would leave the deployer allowlist empty")]
    LastDeployer { identity: Address },

    /// Chain id row collides with an installed mapping
    #[error("{value} is already mapped to a different chain id row")]
    MappingConflict { value: ChainIdValue },

    /// Supplied artifact does not hash to the value referenced by the config
    #[error("{artifact} hash mismatch: config references {expected}, got {got}")]
    HashMismatch {
        artifact: &'static str,
        expected: B256,
        got: B256,
    },

    /// Inbound payload is not a decodable bridge message
    #[error("malformed bridge payload: {0}")]
    MalformedPayload(String),

    /// Messaging transport refused the outbound message
    #[error("transport send failed: {0}")]
    TransportFailure(String),

    /// Asset ledger rejected a mint, burn or transfer
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

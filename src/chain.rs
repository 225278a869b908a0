//! Single-chain protocol assembly.
//!
//! [`HolographChain`] wires every protocol component for one chain, the way
//! a deployed protocol instance looks on mainnet or a testnet:
//!
//! ```text
//! HolographChain (one per chain)
//!   ├── Environment: InMemoryEnvironment   deterministic code store + native chain id
//!   ├── Ledger:      InMemoryLedger        asset ownership and bridge payloads
//!   ├── Genesis:     GenesisDeployer       allowlisted bootstrap deployments
//!   ├── Registry:    HolographRegistry     config hashes, type bindings, chain id maps
//!   ├── Factory:     HolographFactory      signature-gated deterministic deployments
//!   └── Bridge:      HolographBridge       burn/mint transfers over a MessagingModule
//! ```
//!
//! The protocol contracts sit on the same pre-assigned addresses on every
//! chain, so two `HolographChain`s fed the same signed config produce the
//! same contract address. The transport is deliberately not part of the
//! assembly: it spans chains, so the harness borrows one per call.

use alloy_primitives::{Address, Bytes, B256, U256};

use crate::bridge::message::BridgeMessage;
use crate::bridge::HolographBridge;
use crate::config::SignedDeploymentRequest;
use crate::constants::{
    BRIDGE_ADDRESS, DEFAULT_CHAIN_ID, FACTORY_ADDRESS, GENESIS_DEPLOYER_ADDRESS,
};
use crate::environment::{ExecutionEnvironment, InMemoryEnvironment};
use crate::errors::ProtocolError;
use crate::factory::{DeployedContractInfo, HolographFactory};
use crate::genesis::GenesisDeployer;
use crate::messaging::{InFlightMessage, MessagingModule, TransportReceipt};
use crate::registry::chains::{NativeChainId, ProtocolChainId};
use crate::registry::HolographRegistry;
use crate::signer::dev;
use crate::token::InMemoryLedger;

/// Every protocol component for one chain, wired onto the pre-assigned
/// protocol addresses.
#[derive(Debug, Clone)]
pub struct HolographChain {
    /// Code store and address derivation for this chain.
    pub environment: InMemoryEnvironment,
    /// Asset ownership on this chain.
    pub ledger: InMemoryLedger,
    /// Bootstrap deployer with the identity allowlist.
    pub deployer: GenesisDeployer,
    /// Protocol state: holographed hashes, type bindings, chain id maps.
    pub registry: HolographRegistry,
    /// Signature-gated deployer of holographable contracts.
    pub factory: HolographFactory,
    /// Outbound and inbound asset transfers.
    pub bridge: HolographBridge,
}

impl HolographChain {
    /// Assemble the protocol on `native` with `admin` holding the registry
    /// and bridge, and `seed_deployer` as the first allowlisted identity.
    pub fn new(native: NativeChainId, admin: Address, seed_deployer: Address) -> Self {
        Self {
            environment: InMemoryEnvironment::new(native),
            ledger: InMemoryLedger::new(),
            deployer: GenesisDeployer::new(GENESIS_DEPLOYER_ADDRESS, seed_deployer),
            registry: HolographRegistry::new(admin, FACTORY_ADDRESS),
            factory: HolographFactory::new(FACTORY_ADDRESS),
            bridge: HolographBridge::new(BRIDGE_ADDRESS, admin, native),
        }
    }

    /// Development chain with the well-known dev accounts: the first is
    /// admin, the first three are approved genesis deployers.
    pub fn dev_chain() -> Self {
        let accounts = dev::dev_accounts();
        let admin = accounts[0];
        let mut chain = Self::new(NativeChainId(DEFAULT_CHAIN_ID), admin, admin);
        for deployer in &accounts[1..3] {
            chain
                .deployer
                .approve_deployer(admin, *deployer, true)
                .expect("dev admin is an approved deployer");
        }
        chain
    }

    pub fn native_chain_id(&self) -> NativeChainId {
        self.environment.native_chain_id()
    }

    /// Bootstrap deployment through the genesis deployer.
    pub fn deploy_genesis_contract(
        &mut self,
        caller: Address,
        chain_id: NativeChainId,
        salt: B256,
        bytecode: &Bytes,
        init_payload: &Bytes,
    ) -> Result<Address, ProtocolError> {
        self.deployer.deploy(
            &mut self.environment,
            caller,
            chain_id,
            salt,
            bytecode,
            init_payload,
        )
    }

    /// Deploy a signed config through the factory and record it in the
    /// registry.
    pub fn deploy_holographable_contract(
        &mut self,
        request: &SignedDeploymentRequest,
        bytecode: &Bytes,
        init_payload: &Bytes,
    ) -> Result<DeployedContractInfo, ProtocolError> {
        self.factory.deploy_holographable_contract(
            &mut self.environment,
            &mut self.registry,
            request,
            bytecode,
            init_payload,
        )
    }

    /// Send an asset off this chain through `transport`.
    pub fn bridge_out<M: MessagingModule>(
        &mut self,
        transport: &mut M,
        destination: ProtocolChainId,
        collection: Address,
        from_owner: Address,
        to_owner: Address,
        asset_id: U256,
    ) -> Result<TransportReceipt, ProtocolError> {
        self.bridge.bridge_out(
            &self.registry,
            &mut self.ledger,
            transport,
            destination,
            collection,
            from_owner,
            to_owner,
            asset_id,
        )
    }

    /// Apply a transport delivery addressed to this chain's bridge.
    pub fn receive(&mut self, message: &InFlightMessage) -> Result<BridgeMessage, ProtocolError> {
        self.bridge.on_message_received(
            &self.registry,
            &mut self.ledger,
            message.source_chain,
            message.source_address,
            message.nonce,
            &message.payload,
        )
    }
}

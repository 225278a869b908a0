//! # Holograph Core - Deterministic Cross-Chain Deployment Protocol
//!
//! A permissioned deployment engine and bridge protocol: contracts deploy to
//! content-derived addresses that are identical on every chain, and assets
//! move between chains through authenticated burn/mint messages that apply
//! exactly once.

pub mod bridge;
pub mod chain;
pub mod config;
pub mod constants;
pub mod environment;
pub mod errors;
pub mod events;
pub mod factory;
pub mod genesis;
pub mod messaging;
pub mod registry;
pub mod signer;
pub mod token;

//! # Contractgate
//!
//! **Tenant authorization for multi-tenant message brokers.**
//!
//! Contractgate decides whether a capability key presented by a client is
//! entitled to act for a tenant ("contract"), and where contract records come
//! from: the broker's own license, or a remote metadata authority.
//!
//! ## Features
//!
//! - **License codec** - compact URL-safe license text decoded into the broker identity
//! - **Capability keys** - fixed 24-byte tokens with named field accessors
//! - **Constant-time validation** - master, contract and signature always all compared
//! - **Pluggable providers** - static (owner only) or remote (HTTP + JSON lookups)
//! - **Cached, coalesced lookups** - per-id TTL cache with single-flight fetches
//! - **Opaque failures** - unreachable authority and unknown tenant look the same
//!
//! ## Quickstart
//!
//! ```no_run
//! use contractgate::{ContractGate, GateConfig, Key, ProviderKind};
//!
//! fn main() -> Result<(), contractgate::ContractGateError> {
//!     let config = GateConfig::new("LICENSE-TEXT-HERE", ProviderKind::Remote);
//!     let gate = ContractGate::new(&config)?;
//!
//!     let key = Key::from_bytes([0u8; 24]); // bytes received from a client
//!     match gate.authorize(&key) {
//!         Some(contract) => println!("authorized for contract {}", contract.id()),
//!         None => println!("rejected"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Threat Model
//!
//! Contractgate protects against:
//! - **Forged keys** - a key must match master, contract and signature exactly
//! - **Timing attacks** - validation does not short-circuit on the first mismatch
//! - **Tenant enumeration** - lookup failures are indistinguishable from unknown tenants
//!
//! The signature is a shared secret, not a cryptographic signature. Anyone
//! holding a valid key can act for its contract.

#![deny(warnings)]
#![deny(missing_docs)]

// Core modules
pub mod clock;
pub mod config;
pub mod errors;

// Identity layer
pub mod contract;
pub mod key;
pub mod license;

// Protocol layer
pub mod protocol;

// Client layer
pub mod client;

// Provider layer
pub mod provider;

// Gate (main public API)
pub mod gate;

// Re-exports for public API
pub use clock::{Clock, SystemClock};
pub use config::{GateConfig, ProviderKind};
pub use contract::Contract;
pub use errors::ContractGateError;
pub use gate::ContractGate;
pub use key::Key;
pub use license::{parse_license, License, LicenseType};
pub use provider::{CacheSettings, ContractProvider, RemoteContractProvider, StaticContractProvider};

#[cfg(any(test, feature = "test-seams"))]
pub use clock::MockClock;

//! Contract gate - the main public API for contractgate.
//!
//! The `ContractGate` ties the pieces together for a broker:
//! - Parses the broker license once
//! - Builds the configured contract provider
//! - Authorizes capability keys against the provider's contracts

use crate::clock::{Clock, SystemClock};
use crate::config::{GateConfig, ProviderKind};
use crate::contract::Contract;
use crate::key::Key;
use crate::license::{parse_license, License};
use crate::provider::{ContractProvider, RemoteContractProvider, StaticContractProvider};
use crate::ContractGateError;

/// Tenant authorization boundary for one broker.
///
/// Create one instance at startup and share it across connection handlers.
pub struct ContractGate {
    license: License,
    provider: Box<dyn ContractProvider>,
}

impl ContractGate {
    /// Create a gate from configuration.
    ///
    /// Uses the system clock for the license expiry check.
    ///
    /// # Errors
    /// - `ConfigError` - Configuration validation or HTTP client setup failed
    /// - `InvalidLicenseFormat` - License text could not be decoded
    /// - `LicenseExpired` - License expiry date has passed
    pub fn new(config: &GateConfig) -> Result<Self, ContractGateError> {
        Self::with_clock(config, &SystemClock)
    }

    /// Create a gate with a custom clock (for testing).
    #[cfg(any(test, feature = "test-seams"))]
    pub fn new_with_clock(config: &GateConfig, clock: &dyn Clock) -> Result<Self, ContractGateError> {
        Self::with_clock(config, clock)
    }

    fn with_clock(config: &GateConfig, clock: &dyn Clock) -> Result<Self, ContractGateError> {
        config.validate()?;

        let license = parse_license(&config.license)?;
        if let Some(expired_at) = license.expires().filter(|_| license.is_expired(clock)) {
            return Err(ContractGateError::LicenseExpired { expired_at });
        }

        let provider: Box<dyn ContractProvider> = match config.provider {
            ProviderKind::Static => Box::new(StaticContractProvider::new(&license)),
            ProviderKind::Remote => Box::new(RemoteContractProvider::from_config(&license, config)?),
        };

        tracing::info!(
            provider = ?config.provider,
            contract = license.contract(),
            master = license.master(),
            "contract gate initialized"
        );

        Ok(Self { license, provider })
    }

    /// Wrap an already constructed provider.
    pub fn from_provider(license: License, provider: Box<dyn ContractProvider>) -> Self {
        Self { license, provider }
    }

    /// Resolve and validate a capability key.
    ///
    /// Returns the contract the key is entitled to act for, or `None` when the
    /// contract is unknown, unreachable, or the key does not match it.
    pub fn authorize(&self, key: &Key) -> Option<Contract> {
        let contract = self.provider.get(key.contract())?;
        if contract.validate(key) {
            Some(contract)
        } else {
            tracing::debug!(contract = key.contract(), "capability key rejected");
            None
        }
    }

    /// The broker license.
    pub fn license(&self) -> &License {
        &self.license
    }

    /// The active contract provider.
    pub fn provider(&self) -> &dyn ContractProvider {
        self.provider.as_ref()
    }
}

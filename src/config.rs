//! Contractgate configuration.

use std::time::Duration;

/// Metadata authority used when none is configured.
pub const DEFAULT_METADATA_BASE: &str = "http://meta.emitter.io";

/// Which contract provider a gate should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Only the owner contract from the local license.
    Static,
    /// Owner contract plus lookups against the metadata authority.
    Remote,
}

/// Configuration for a [`ContractGate`](crate::ContractGate).
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Broker license text (URL-safe base64).
    pub license: String,

    /// Provider variant to construct.
    pub provider: ProviderKind,

    /// Base URL of the metadata authority (remote provider only).
    /// Lookups go to `<metadata_base>/v1/contract/<id>`.
    pub metadata_base: String,

    /// User-Agent product identifier (e.g., "emitter-broker").
    pub user_agent_product: &'static str,

    /// Request timeout for metadata lookups.
    pub http_timeout: Duration,

    /// How long a contract fetched from the authority stays cached.
    pub cache_ttl: Duration,

    /// How long a failed or empty lookup stays cached.
    /// Keeps an unreachable authority from being queried on every request.
    pub negative_cache_ttl: Duration,

    /// Upper bound on cached contract ids.
    pub cache_max_entries: u64,
}

impl GateConfig {
    /// Configuration with default remote settings.
    pub fn new(license: impl Into<String>, provider: ProviderKind) -> Self {
        Self {
            license: license.into(),
            provider,
            metadata_base: DEFAULT_METADATA_BASE.to_string(),
            user_agent_product: "broker",
            http_timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(5 * 60),
            negative_cache_ttl: Duration::from_secs(30),
            cache_max_entries: 10_000,
        }
    }

    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), crate::ContractGateError> {
        if self.license.trim().is_empty() {
            return Err(crate::ContractGateError::ConfigError(
                "license cannot be empty".to_string(),
            ));
        }
        if self.provider == ProviderKind::Static {
            return Ok(());
        }

        if !(self.metadata_base.starts_with("http://") || self.metadata_base.starts_with("https://")) {
            return Err(crate::ContractGateError::ConfigError(format!(
                "metadata_base must be an http(s) URL, got {:?}",
                self.metadata_base
            )));
        }
        if self.http_timeout.is_zero() {
            return Err(crate::ContractGateError::ConfigError(
                "http_timeout must be non-zero".to_string(),
            ));
        }
        if self.cache_ttl.is_zero() || self.negative_cache_ttl.is_zero() {
            return Err(crate::ContractGateError::ConfigError(
                "cache TTLs must be non-zero".to_string(),
            ));
        }
        if self.cache_max_entries == 0 {
            return Err(crate::ContractGateError::ConfigError(
                "cache_max_entries must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

//! Provider backed by the remote metadata authority.
//!
//! Lookups are cached per contract id. Found contracts and absences expire
//! on separate timers, and concurrent misses for the same id share a single
//! fetch. The cache only locks per entry, so a slow lookup for one id never
//! blocks lookups for other ids.

use crate::client::http::MetadataClient;
use crate::client::ContractFetcher;
use crate::config::{GateConfig, DEFAULT_METADATA_BASE};
use crate::contract::Contract;
use crate::license::License;
use crate::protocol::models::ContractRecord;
use crate::provider::{ContractProvider, NO_CONTRACT};
use crate::ContractGateError;
use moka::sync::Cache;
use moka::Expiry;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cache tuning for [`RemoteContractProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Lifetime of a found contract.
    pub ttl: Duration,
    /// Lifetime of a "not found" or failed lookup.
    pub negative_ttl: Duration,
    /// Maximum number of cached ids.
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            negative_ttl: Duration::from_secs(30),
            max_entries: 10_000,
        }
    }
}

impl From<&GateConfig> for CacheSettings {
    fn from(config: &GateConfig) -> Self {
        Self {
            ttl: config.cache_ttl,
            negative_ttl: config.negative_cache_ttl,
            max_entries: config.cache_max_entries,
        }
    }
}

struct LookupExpiry {
    ttl: Duration,
    negative_ttl: Duration,
}

impl Expiry<u32, Option<Contract>> for LookupExpiry {
    fn expire_after_create(
        &self,
        _id: &u32,
        value: &Option<Contract>,
        _created_at: Instant,
    ) -> Option<Duration> {
        match value {
            Some(_) => Some(self.ttl),
            None => Some(self.negative_ttl),
        }
    }
}

/// Stand-in used when the HTTP client cannot be built; every lookup fails.
struct UnavailableFetcher {
    reason: String,
}

impl ContractFetcher for UnavailableFetcher {
    fn fetch_contract(&self, _id: u32) -> Result<ContractRecord, ContractGateError> {
        Err(ContractGateError::MetadataTransport(format!(
            "HTTP client unavailable: {}",
            self.reason
        )))
    }
}

/// Multi-tenant provider resolving contracts through the metadata authority.
pub struct RemoteContractProvider {
    owner: Contract,
    fetcher: Arc<dyn ContractFetcher>,
    cache: Cache<u32, Option<Contract>>,
}

impl RemoteContractProvider {
    /// Create a provider against the default metadata authority.
    ///
    /// If the HTTP client cannot be built (TLS backend failure), the error is
    /// logged and the provider serves only the owner contract. Use
    /// [`from_config`](Self::from_config) to surface that error instead.
    pub fn new(license: &License) -> Self {
        let fetcher: Arc<dyn ContractFetcher> = match MetadataClient::new(DEFAULT_METADATA_BASE) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                tracing::error!(error = %e, "metadata client unavailable, remote lookups disabled");
                Arc::new(UnavailableFetcher {
                    reason: e.to_string(),
                })
            }
        };
        Self::with_fetcher(license, fetcher, CacheSettings::default())
    }

    /// Create a provider from gate configuration.
    ///
    /// # Errors
    /// `ConfigError` if the HTTP client cannot be built.
    pub fn from_config(license: &License, config: &GateConfig) -> Result<Self, ContractGateError> {
        let client = MetadataClient::from_config(config)?;
        Ok(Self::with_fetcher(license, Arc::new(client), CacheSettings::from(config)))
    }

    /// Create a provider with an explicit fetcher and cache settings.
    pub fn with_fetcher(
        license: &License,
        fetcher: Arc<dyn ContractFetcher>,
        settings: CacheSettings,
    ) -> Self {
        let owner = Contract::from_license(license);
        let cache: Cache<u32, Option<Contract>> = Cache::builder()
            .max_capacity(settings.max_entries)
            .expire_after(LookupExpiry {
                ttl: settings.ttl,
                negative_ttl: settings.negative_ttl,
            })
            .build();

        tracing::debug!(
            contract = owner.id(),
            ttl_secs = settings.ttl.as_secs(),
            negative_ttl_secs = settings.negative_ttl.as_secs(),
            "remote contract provider ready"
        );

        Self {
            owner,
            fetcher,
            cache,
        }
    }

    /// The owner contract.
    pub fn owner(&self) -> &Contract {
        &self.owner
    }

    /// Drop any cached lookup for `id`; the next `get` refetches.
    pub fn invalidate(&self, id: u32) {
        self.cache.invalidate(&id);
    }

    /// Fetch from the authority, folding every failure into `None`.
    fn lookup(&self, id: u32) -> Option<Contract> {
        let result = self
            .fetcher
            .fetch_contract(id)
            .and_then(|record| record.into_contract(id));

        match result {
            Ok(contract) => {
                tracing::debug!(contract = id, "contract fetched from metadata authority");
                Some(contract)
            }
            Err(e) => {
                tracing::warn!(contract = id, error = %e, "contract lookup failed");
                None
            }
        }
    }
}

impl ContractProvider for RemoteContractProvider {
    fn create(&self) -> Result<Contract, ContractGateError> {
        Err(ContractGateError::NotSupported)
    }

    fn get(&self, id: u32) -> Option<Contract> {
        if id == NO_CONTRACT {
            tracing::debug!("contract id 0 requested, skipping lookup");
            return None;
        }
        if id == self.owner.id() {
            return Some(self.owner.clone());
        }

        // Concurrent misses on the same id run `lookup` once; the rest wait
        // for its result.
        self.cache.get_with(id, || self.lookup(id))
    }
}

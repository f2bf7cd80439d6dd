//! Reqwest-based HTTP client for the metadata authority.

use crate::client::ContractFetcher;
use crate::config::GateConfig;
use crate::protocol::models::{parse_contract_record, ContractRecord};
use crate::ContractGateError;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Metadata authority HTTP client.
pub struct MetadataClient {
    client: Client,
    user_agent: String,
    base_url: String,
}

impl MetadataClient {
    /// Create a client for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ContractGateError> {
        Self::build(base_url.into(), DEFAULT_TIMEOUT, build_user_agent("broker"))
    }

    /// Create a client from gate configuration.
    pub fn from_config(config: &GateConfig) -> Result<Self, ContractGateError> {
        Self::build(
            config.metadata_base.clone(),
            config.http_timeout,
            build_user_agent(config.user_agent_product),
        )
    }

    fn build(base_url: String, timeout: Duration, user_agent: String) -> Result<Self, ContractGateError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ContractGateError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the record for `id`.
    pub fn contract_url(&self, id: u32) -> String {
        format!("{}/v1/contract/{}", self.base_url, id)
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ContractFetcher for MetadataClient {
    fn fetch_contract(&self, id: u32) -> Result<ContractRecord, ContractGateError> {
        let url = self.contract_url(id);

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| ContractGateError::MetadataTransport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContractGateError::MetadataTransport(format!(
                "Unexpected status {} from {}",
                status.as_u16(),
                url
            )));
        }

        let body = response
            .bytes()
            .map_err(|e| ContractGateError::MetadataTransport(format!("Failed to read body: {}", e)))?;

        parse_contract_record(&body)
    }
}

/// Build a User-Agent string.
///
/// Format: `<product>/contractgate-<version>`
pub fn build_user_agent(product: &str) -> String {
    format!("{}/contractgate-{}", product, env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProviderKind, DEFAULT_METADATA_BASE};
    use httpmock::prelude::*;

    #[test]
    fn test_build_user_agent_format() {
        let ua = build_user_agent("emitter");
        assert_eq!(ua, format!("emitter/contractgate-{}", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_contract_url() {
        let client = MetadataClient::new("http://meta.emitter.io/").unwrap();
        assert_eq!(client.base_url(), "http://meta.emitter.io");
        assert_eq!(client.contract_url(1), "http://meta.emitter.io/v1/contract/1");
    }

    #[test]
    fn test_default_base_client() {
        let client = MetadataClient::new(DEFAULT_METADATA_BASE).unwrap();
        assert_eq!(client.base_url(), DEFAULT_METADATA_BASE);
    }

    #[test]
    fn test_from_config() {
        let mut config = GateConfig::new("license", ProviderKind::Remote);
        config.metadata_base = "https://meta.example.com".to_string();
        let client = MetadataClient::from_config(&config).unwrap();
        assert_eq!(client.contract_url(9), "https://meta.example.com/v1/contract/9");
    }

    #[test]
    fn test_fetch_contract_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/v1/contract/7");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id": 7, "master": 1, "signature": 99}"#);
        });

        let client = MetadataClient::new(server.base_url()).unwrap();
        let record = client.fetch_contract(7).unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.master, 1);
        assert_eq!(record.signature, 99);
        assert_eq!(mock.calls(), 1);
    }

    #[test]
    fn test_fetch_contract_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/contract/8");
            then.status(404);
        });

        let client = MetadataClient::new(server.base_url()).unwrap();
        let result = client.fetch_contract(8);
        assert!(matches!(result, Err(ContractGateError::MetadataTransport(_))));
    }

    #[test]
    fn test_fetch_contract_bad_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/contract/9");
            then.status(200).body("<html>oops</html>");
        });

        let client = MetadataClient::new(server.base_url()).unwrap();
        let result = client.fetch_contract(9);
        assert!(matches!(result, Err(ContractGateError::ProtocolError(_))));
    }

    #[test]
    fn test_fetch_contract_unreachable() {
        // Port 9 (discard) is not expected to serve HTTP.
        let client = MetadataClient::build(
            "http://127.0.0.1:9".to_string(),
            Duration::from_secs(2),
            build_user_agent("test"),
        )
        .unwrap();
        let result = client.fetch_contract(1);
        assert!(matches!(result, Err(ContractGateError::MetadataTransport(_))));
    }
}

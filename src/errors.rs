//! Contractgate error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while establishing identity or looking up contracts.
///
/// Contract lookups themselves never surface these to callers: providers fold
/// every failure into "not found". Only bootstrap paths (license parsing,
/// configuration, provisioning attempts) return them.
#[derive(Debug, Error)]
pub enum ContractGateError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// License text does not decode to a license record.
    #[error("Invalid license format")]
    InvalidLicenseFormat,

    /// License expiry date has passed.
    #[error("License expired at {expired_at}")]
    LicenseExpired {
        /// When the license stopped being valid.
        expired_at: DateTime<Utc>,
    },

    /// Contract provisioning is not available through this provider.
    #[error("Contract provisioning is not supported by this provider")]
    NotSupported,

    /// A capability key buffer had the wrong length.
    #[error("Capability key must be 24 bytes, got {len}")]
    InvalidKeyLength {
        /// Length of the rejected buffer.
        len: usize,
    },

    /// HTTP transport error communicating with the metadata authority.
    #[error("Metadata transport error: {0}")]
    MetadataTransport(String),

    /// Failed to decode a metadata response.
    #[error("Protocol error: {0}")]
    ProtocolError(String),
}

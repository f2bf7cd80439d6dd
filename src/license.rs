//! License codec.
//!
//! A license is a 32-byte record carried as URL-safe base64 text:
//!
//! ```text
//! [0..16)  cipher key (opaque)
//! [16..20) contract id        u32 BE
//! [20..24) contract signature u32 BE
//! [24..28) expiry, unix secs  u32 BE (0 = never)
//! [28..32) license type       u32 BE
//! ```
//!
//! The record has no master field; every license in this format is issued by
//! [`DEFAULT_MASTER_ID`].

use crate::clock::Clock;
use crate::ContractGateError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Size of a decoded license record in bytes.
pub const LICENSE_SIZE: usize = 32;

/// Master identifier of licenses that carry no explicit master.
pub const DEFAULT_MASTER_ID: u16 = 1;

/// Deployment type recorded in the license.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseType {
    /// Unrecognized or unset type.
    Unknown,
    /// Hosted, multi-tenant deployment.
    Cloud,
    /// Self-hosted deployment.
    OnPremise,
}

impl LicenseType {
    fn from_wire(value: u32) -> Self {
        match value {
            1 => Self::Cloud,
            2 => Self::OnPremise,
            _ => Self::Unknown,
        }
    }

    fn to_wire(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::Cloud => 1,
            Self::OnPremise => 2,
        }
    }
}

/// Decoded broker license.
#[derive(Clone, PartialEq, Eq)]
pub struct License {
    cipher_key: [u8; 16],
    master: u16,
    contract: u32,
    signature: u32,
    expires: Option<DateTime<Utc>>,
    license_type: LicenseType,
}

impl License {
    /// Master that issued this license.
    pub fn master(&self) -> u16 {
        self.master
    }

    /// Contract (tenant) this license grants ownership of.
    pub fn contract(&self) -> u32 {
        self.contract
    }

    /// Shared secret bound to the contract.
    pub fn signature(&self) -> u32 {
        self.signature
    }

    /// Opaque key material from the record head.
    pub fn cipher_key(&self) -> &[u8; 16] {
        &self.cipher_key
    }

    /// Expiry time, or `None` for a perpetual license.
    pub fn expires(&self) -> Option<DateTime<Utc>> {
        self.expires
    }

    /// Deployment type.
    pub fn license_type(&self) -> LicenseType {
        self.license_type
    }

    /// Whether the license has passed its expiry date.
    pub fn is_expired<C: Clock + ?Sized>(&self, clock: &C) -> bool {
        self.expires.is_some_and(|at| at <= clock.now_utc())
    }

    /// Encode back to the canonical text form.
    pub fn encode(&self) -> String {
        let mut raw = [0u8; LICENSE_SIZE];
        raw[0..16].copy_from_slice(&self.cipher_key);
        raw[16..20].copy_from_slice(&self.contract.to_be_bytes());
        raw[20..24].copy_from_slice(&self.signature.to_be_bytes());
        let expires = self
            .expires
            .map(|at| u32::try_from(at.timestamp()).unwrap_or(u32::MAX))
            .unwrap_or(0);
        raw[24..28].copy_from_slice(&expires.to_be_bytes());
        raw[28..32].copy_from_slice(&self.license_type.to_wire().to_be_bytes());
        URL_SAFE_NO_PAD.encode(raw)
    }

    fn from_record(raw: &[u8; LICENSE_SIZE]) -> Self {
        let mut cipher_key = [0u8; 16];
        cipher_key.copy_from_slice(&raw[0..16]);

        let expires = match read_u32(raw, 24) {
            0 => None,
            secs => DateTime::from_timestamp(i64::from(secs), 0),
        };

        Self {
            cipher_key,
            master: DEFAULT_MASTER_ID,
            contract: read_u32(raw, 16),
            signature: read_u32(raw, 20),
            expires,
            license_type: LicenseType::from_wire(read_u32(raw, 28)),
        }
    }
}

// Keeps the cipher key and signature out of logs.
impl fmt::Debug for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("License")
            .field("master", &self.master)
            .field("contract", &self.contract)
            .field("expires", &self.expires)
            .field("license_type", &self.license_type)
            .finish_non_exhaustive()
    }
}

impl FromStr for License {
    type Err = ContractGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_license(s)
    }
}

/// Decode a license from its text form.
///
/// # Errors
/// `InvalidLicenseFormat` if the text contains anything outside the
/// unpadded URL-safe base64 alphabet (padding and whitespace included) or
/// does not decode to exactly 32 bytes.
pub fn parse_license(text: &str) -> Result<License, ContractGateError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(text)
        .map_err(|_| ContractGateError::InvalidLicenseFormat)?;

    let raw: [u8; LICENSE_SIZE] = bytes
        .try_into()
        .map_err(|_| ContractGateError::InvalidLicenseFormat)?;

    Ok(License::from_record(&raw))
}

fn read_u32(raw: &[u8; LICENSE_SIZE], at: usize) -> u32 {
    u32::from_be_bytes([raw[at], raw[at + 1], raw[at + 2], raw[at + 3]])
}

//! Capability keys presented by clients.
//!
//! Layout (big-endian):
//!
//! ```text
//! [0..2)   reserved
//! [2..4)   master id    u16
//! [4..8)   contract id  u32
//! [8..12)  signature    u32
//! [12..24) reserved for capability bits (permissions, target, expiry)
//! ```

use crate::ContractGateError;
use std::fmt;

/// Size of a capability key in bytes.
pub const KEY_SIZE: usize = 24;

const MASTER: usize = 2;
const CONTRACT: usize = 4;
const SIGNATURE: usize = 8;

/// Fixed-width capability key.
///
/// A key carries no validity of its own; it is only meaningful when compared
/// against a [`Contract`](crate::Contract).
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Key([u8; KEY_SIZE]);

impl Key {
    /// Zeroed key.
    pub fn new() -> Self {
        Self([0u8; KEY_SIZE])
    }

    /// Wrap raw key bytes received from a client.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Whether every byte is zero.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Master id the key claims.
    pub fn master(&self) -> u16 {
        u16::from_be_bytes([self.0[MASTER], self.0[MASTER + 1]])
    }

    /// Set the master id.
    pub fn set_master(&mut self, value: u16) {
        self.0[MASTER..MASTER + 2].copy_from_slice(&value.to_be_bytes());
    }

    /// Contract id the key claims.
    pub fn contract(&self) -> u32 {
        self.read_u32(CONTRACT)
    }

    /// Set the contract id.
    pub fn set_contract(&mut self, value: u32) {
        self.write_u32(CONTRACT, value);
    }

    /// Signature the key carries.
    pub fn signature(&self) -> u32 {
        self.read_u32(SIGNATURE)
    }

    /// Set the signature.
    pub fn set_signature(&mut self, value: u32) {
        self.write_u32(SIGNATURE, value);
    }

    fn read_u32(&self, at: usize) -> u32 {
        u32::from_be_bytes([self.0[at], self.0[at + 1], self.0[at + 2], self.0[at + 3]])
    }

    fn write_u32(&mut self, at: usize, value: u32) {
        self.0[at..at + 4].copy_from_slice(&value.to_be_bytes());
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = ContractGateError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| ContractGateError::InvalidKeyLength { len: bytes.len() })?;
        Ok(Self(raw))
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Signature is a shared secret; keep it out of logs.
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("master", &self.master())
            .field("contract", &self.contract())
            .finish_non_exhaustive()
    }
}

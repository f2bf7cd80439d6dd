//! Tenant contracts.

use crate::key::Key;
use crate::license::License;
use std::fmt;
use subtle::ConstantTimeEq;

/// Authoritative record for one tenant.
#[derive(Clone, PartialEq, Eq)]
pub struct Contract {
    id: u32,
    master: u16,
    signature: u32,
}

impl Contract {
    /// Create a contract record.
    pub fn new(id: u32, master: u16, signature: u32) -> Self {
        Self {
            id,
            master,
            signature,
        }
    }

    /// Owner contract described by a license.
    pub fn from_license(license: &License) -> Self {
        Self::new(license.contract(), license.master(), license.signature())
    }

    /// Contract id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Master id that owns the contract.
    pub fn master(&self) -> u16 {
        self.master
    }

    /// Shared secret keys must carry.
    pub fn signature(&self) -> u32 {
        self.signature
    }

    /// Check a presented key against this contract.
    ///
    /// All three fields are compared in constant time and every comparison is
    /// evaluated, so timing does not reveal which field mismatched.
    pub fn validate(&self, key: &Key) -> bool {
        let master = self.master.ct_eq(&key.master());
        let contract = self.id.ct_eq(&key.contract());
        let signature = self.signature.ct_eq(&key.signature());

        bool::from(master & contract & signature)
    }
}

impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contract")
            .field("id", &self.id)
            .field("master", &self.master)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> Contract {
        Contract::new(42, 1, 0xcafe_babe)
    }

    fn matching_key() -> Key {
        let mut key = Key::new();
        key.set_master(1);
        key.set_contract(42);
        key.set_signature(0xcafe_babe);
        key
    }

    #[test]
    fn test_validate_matching_key() {
        assert!(contract().validate(&matching_key()));
    }

    #[test]
    fn test_validate_wrong_master() {
        let mut key = matching_key();
        key.set_master(2);
        assert!(!contract().validate(&key));
    }

    #[test]
    fn test_validate_wrong_contract() {
        let mut key = matching_key();
        key.set_contract(43);
        assert!(!contract().validate(&key));
    }

    #[test]
    fn test_validate_wrong_signature() {
        let mut key = matching_key();
        key.set_signature(0xcafe_babf);
        assert!(!contract().validate(&key));
    }

    #[test]
    fn test_validate_empty_key() {
        assert!(!contract().validate(&Key::new()));
    }

    #[test]
    fn test_validate_does_not_mutate() {
        let c = contract();
        let key = matching_key();
        let before = *key.as_bytes();

        c.validate(&key);

        assert_eq!(key.as_bytes(), &before);
        assert_eq!(c, contract());
    }

    #[test]
    fn test_reserved_bytes_ignored() {
        let mut bytes = *matching_key().as_bytes();
        bytes[0] = 0xff;
        bytes[20] = 0xff;
        assert!(contract().validate(&Key::from_bytes(bytes)));
    }
}

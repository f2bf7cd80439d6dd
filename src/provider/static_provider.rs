//! Provider serving only the owner contract.

use crate::contract::Contract;
use crate::license::License;
use crate::provider::ContractProvider;
use crate::ContractGateError;

/// Single-tenant provider built from the broker license.
#[derive(Debug, Clone)]
pub struct StaticContractProvider {
    owner: Contract,
}

impl StaticContractProvider {
    /// Create a provider whose only contract is the license owner's.
    pub fn new(license: &License) -> Self {
        let owner = Contract::from_license(license);
        tracing::debug!(contract = owner.id(), master = owner.master(), "static contract provider ready");
        Self { owner }
    }

    /// The owner contract.
    pub fn owner(&self) -> &Contract {
        &self.owner
    }
}

impl ContractProvider for StaticContractProvider {
    fn create(&self) -> Result<Contract, ContractGateError> {
        Err(ContractGateError::NotSupported)
    }

    fn get(&self, id: u32) -> Option<Contract> {
        (id == self.owner.id()).then(|| self.owner.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;
    use crate::license::parse_license;

    const LICENSE: &str = "zT83oDV0DWY5_JysbSTPTDr8KB0AAAAAAAAAAAAAAAI";

    fn provider() -> (License, StaticContractProvider) {
        let license = parse_license(LICENSE).unwrap();
        let provider = StaticContractProvider::new(&license);
        (license, provider)
    }

    #[test]
    fn test_owner_from_license() {
        let (license, p) = provider();

        assert_eq!(p.owner().master(), 1);
        assert_eq!(p.owner().signature(), license.signature());
        assert_eq!(p.owner().id(), license.contract());
    }

    #[test]
    fn test_create_not_supported() {
        let (_, p) = provider();
        assert!(matches!(p.create(), Err(ContractGateError::NotSupported)));
    }

    #[test]
    fn test_get() {
        let (license, p) = provider();

        assert_eq!(p.get(license.contract()).as_ref(), Some(p.owner()));
        assert!(p.get(0).is_none());
        assert!(p.get(license.contract().wrapping_add(1)).is_none());
    }

    #[test]
    fn test_validate_owner_key() {
        let (license, p) = provider();
        let contract = p.get(license.contract()).unwrap();

        let mut key = Key::new();
        key.set_master(1);
        key.set_contract(license.contract());
        key.set_signature(license.signature());

        assert!(contract.validate(&key));
    }

    #[test]
    fn test_usable_as_trait_object() {
        let (license, p) = provider();
        let boxed: Box<dyn ContractProvider> = Box::new(p);
        assert!(boxed.get(license.contract()).is_some());
    }
}

//! Contract providers.
//!
//! A provider answers "which contract has this id?". Exactly one provider is
//! built per broker; new variants only need to implement [`ContractProvider`].

pub mod remote;
pub mod static_provider;

use crate::contract::Contract;
use crate::ContractGateError;

pub use remote::{CacheSettings, RemoteContractProvider};
pub use static_provider::StaticContractProvider;

/// Contract id reserved as "invalid/unknown".
pub const NO_CONTRACT: u32 = 0;

/// Source of tenant contracts.
pub trait ContractProvider: Send + Sync {
    /// Provision a new contract.
    ///
    /// Provisioning happens out of band; the built-in providers always return
    /// [`ContractGateError::NotSupported`].
    fn create(&self) -> Result<Contract, ContractGateError>;

    /// Look up a contract by id.
    ///
    /// `None` covers unknown ids and every lookup failure alike.
    fn get(&self, id: u32) -> Option<Contract>;
}

impl<P: ContractProvider + ?Sized> ContractProvider for Box<P> {
    fn create(&self) -> Result<Contract, ContractGateError> {
        (**self).create()
    }

    fn get(&self, id: u32) -> Option<Contract> {
        (**self).get(id)
    }
}

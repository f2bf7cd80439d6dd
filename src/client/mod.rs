//! Clients for the remote metadata authority.

pub mod http;

use crate::protocol::models::ContractRecord;
use crate::ContractGateError;

/// Fetches contract records by id.
///
/// Implementations own their timeout and transport behaviour. Any failure is
/// reported as an error; callers decide how to fold it.
pub trait ContractFetcher: Send + Sync {
    /// Fetch the record for `id`.
    fn fetch_contract(&self, id: u32) -> Result<ContractRecord, ContractGateError>;
}

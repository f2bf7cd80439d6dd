//! Metadata authority response structs.

use crate::contract::Contract;
use crate::ContractGateError;
use serde::{Deserialize, Serialize};

/// Contract record as served by `GET /v1/contract/<id>`.
///
/// Every field `Contract::validate` compares is required; a record missing
/// one is a protocol error, never a contract with zeroed credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRecord {
    /// Contract id.
    pub id: u32,
    /// Owning master id.
    pub master: u16,
    /// Shared secret.
    pub signature: u32,
}

impl ContractRecord {
    /// Convert into a contract, checking it answers the requested id.
    pub fn into_contract(self, requested: u32) -> Result<Contract, ContractGateError> {
        if self.id != requested {
            return Err(ContractGateError::ProtocolError(format!(
                "Requested contract {} but authority returned {}",
                requested, self.id
            )));
        }
        Ok(Contract::new(self.id, self.master, self.signature))
    }
}

/// Parse raw JSON body into a contract record.
pub fn parse_contract_record(body: &[u8]) -> Result<ContractRecord, ContractGateError> {
    serde_json::from_slice(body)
        .map_err(|e| ContractGateError::ProtocolError(format!("Failed to parse contract record: {}", e)))
}

use crate::registry::StoreError;
use providers::{AddressError, ProviderError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("{0}")]
    InvalidAddress(#[from] AddressError),
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    ContractCall(String),
    #[error("{0}")]
    Conversion(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<ProviderError> for LookupError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::ContractCall(_) => Self::ContractCall(e.to_string()),
            ProviderError::Network(_) | ProviderError::InvalidEndpoint(_) => {
                Self::Network(e.to_string())
            }
        }
    }
}

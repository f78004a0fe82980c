pub mod address;
pub mod evm;

use async_trait::async_trait;
use std::sync::Arc;

pub use address::{normalize, AddressError, ChecksumAddress};
pub use evm::{format_units, ProviderError, Web3Connector, Web3Reader};
pub use web3::{
    ethabi::{Contract as Abi, Token},
    types::{Address, U256},
};

/// Read-only access to a single remote node.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Balance of `address` in the chain's smallest unit.
    async fn get_native_balance(&self, address: Address) -> Result<U256, ProviderError>;

    /// Executes a view function of `contract` and returns its decoded outputs.
    async fn call_read_only(
        &self,
        contract: Address,
        abi: &Abi,
        method: &str,
        args: &[Token],
    ) -> Result<Vec<Token>, ProviderError>;
}

#[async_trait]
impl<R: ChainReader + ?Sized> ChainReader for Arc<R> {
    async fn get_native_balance(&self, address: Address) -> Result<U256, ProviderError> {
        (**self).get_native_balance(address).await
    }

    async fn call_read_only(
        &self,
        contract: Address,
        abi: &Abi,
        method: &str,
        args: &[Token],
    ) -> Result<Vec<Token>, ProviderError> {
        (**self).call_read_only(contract, abi, method, args).await
    }
}

/// Builds a [`ChainReader`] bound to one endpoint.
pub trait Connector: Send + Sync {
    type Reader: ChainReader;

    fn connect(&self, endpoint: &str) -> Result<Self::Reader, ProviderError>;
}

#[macro_export]
macro_rules! address {
    ($addr:expr) => {{
        $crate::address::parse_lenient($addr).expect(&format!("Invalid address {}", $addr))
    }};
}

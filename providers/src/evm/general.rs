use crate::{ChainReader, Connector};
use async_trait::async_trait;
use std::{future::Future, time::Duration};
use thiserror::Error;
use web3::{
    ethabi::{self, Contract, Token},
    transports::Http,
    types::{Address, Bytes, CallRequest, U256},
    Web3,
};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Invalid endpoint `{0}`")]
    InvalidEndpoint(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Contract call failed: {0}")]
    ContractCall(String),
}

impl From<web3::Error> for ProviderError {
    fn from(e: web3::Error) -> Self {
        match &e {
            web3::Error::Rpc(_) | web3::Error::Decoder(_) | web3::Error::InvalidResponse(_) => {
                Self::ContractCall(e.to_string())
            }
            _ => Self::Network(e.to_string()),
        }
    }
}

impl From<ethabi::Error> for ProviderError {
    fn from(e: ethabi::Error) -> Self {
        Self::ContractCall(e.to_string())
    }
}

pub struct Web3Connector {
    timeout: Duration,
}

impl Web3Connector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Connector for Web3Connector {
    type Reader = Web3Reader;

    fn connect(&self, endpoint: &str) -> Result<Self::Reader, ProviderError> {
        let transport =
            Http::new(endpoint).map_err(|e| ProviderError::InvalidEndpoint(e.to_string()))?;

        log::debug!("connected to {endpoint}");

        Ok(Web3Reader {
            web3: Web3::new(transport),
            timeout: self.timeout,
        })
    }
}

pub struct Web3Reader {
    web3: Web3<Http>,
    timeout: Duration,
}

impl Web3Reader {
    async fn bounded<T, F>(&self, request: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, web3::Error>>,
    {
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| {
                ProviderError::Network(format!("request timed out after {:?}", self.timeout))
            })?
            .map_err(ProviderError::from)
    }
}

#[async_trait]
impl ChainReader for Web3Reader {
    async fn get_native_balance(&self, address: Address) -> Result<U256, ProviderError> {
        self.bounded(self.web3.eth().balance(address, None)).await
    }

    async fn call_read_only(
        &self,
        contract: Address,
        abi: &Contract,
        method: &str,
        args: &[Token],
    ) -> Result<Vec<Token>, ProviderError> {
        let function = abi.function(method)?;
        let request = CallRequest {
            to: Some(contract),
            data: Some(Bytes(function.encode_input(args)?)),
            ..Default::default()
        };

        let output = self.bounded(self.web3.eth().call(request, None)).await?;

        // Calls to accounts without code succeed with an empty payload.
        if output.0.is_empty() {
            return Err(ProviderError::ContractCall(format!(
                "`{method}` returned no data from {contract:#x}"
            )));
        }

        Ok(function.decode_output(&output.0)?)
    }
}

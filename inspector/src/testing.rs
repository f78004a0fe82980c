use crate::types::{Address, U256};
use async_trait::async_trait;
use providers::{address, Abi, ChainReader, Connector, ProviderError, Token};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

pub const OWNER: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
pub const TOKEN_A: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
pub const TOKEN_B: &str = "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB";
pub const TOKEN_C: &str = "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb";

#[derive(Clone)]
pub struct MockToken {
    pub symbol: Option<String>,
    pub decimals: u8,
    pub balance: U256,
}

impl MockToken {
    pub fn new(symbol: &str, decimals: u8, balance: impl Into<U256>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            decimals,
            balance: balance.into(),
        }
    }

    pub fn failing_symbol(decimals: u8, balance: impl Into<U256>) -> Self {
        Self {
            symbol: None,
            decimals,
            balance: balance.into(),
        }
    }
}

/// In-memory node answering by method name. `None` fields revert.
pub struct MockReader {
    pub native: U256,
    pub is_wallet: bool,
    pub guardians: Option<U256>,
    pub tokens: HashMap<Address, MockToken>,
    pub calls: AtomicUsize,
}

impl Default for MockReader {
    fn default() -> Self {
        Self {
            native: U256::zero(),
            is_wallet: false,
            guardians: Some(U256::zero()),
            tokens: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl MockReader {
    pub fn with_token(mut self, address: &str, token: MockToken) -> Self {
        self.tokens.insert(address!(address), token);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn revert(method: &str) -> ProviderError {
    ProviderError::ContractCall(format!("`{method}` reverted"))
}

#[async_trait]
impl ChainReader for MockReader {
    async fn get_native_balance(&self, _address: Address) -> Result<U256, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        Ok(self.native)
    }

    async fn call_read_only(
        &self,
        contract: Address,
        _abi: &Abi,
        method: &str,
        _args: &[Token],
    ) -> Result<Vec<Token>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let token = match method {
            "isArgentWallet" => Token::Bool(self.is_wallet),
            "guardianCount" => Token::Uint(self.guardians.ok_or_else(|| revert(method))?),
            _ => {
                let erc20 = self.tokens.get(&contract).ok_or_else(|| revert(method))?;

                match method {
                    "symbol" => Token::String(erc20.symbol.clone().ok_or_else(|| revert(method))?),
                    "decimals" => Token::Uint(erc20.decimals.into()),
                    "balanceOf" => Token::Uint(erc20.balance),
                    _ => return Err(revert(method)),
                }
            }
        };

        Ok(vec![token])
    }
}

#[derive(Default)]
pub struct MockConnector {
    pub reader: Arc<MockReader>,
    connects: AtomicUsize,
}

impl MockConnector {
    pub fn new(reader: MockReader) -> Self {
        Self {
            reader: Arc::new(reader),
            connects: AtomicUsize::new(0),
        }
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl Connector for MockConnector {
    type Reader = Arc<MockReader>;

    fn connect(&self, _endpoint: &str) -> Result<Self::Reader, ProviderError> {
        self.connects.fetch_add(1, Ordering::SeqCst);

        Ok(Arc::clone(&self.reader))
    }
}

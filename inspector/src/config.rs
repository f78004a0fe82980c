use crate::types::{Address, TokenAddress};
use providers::address;
use std::{path::PathBuf, time::Duration};
use thiserror::Error;

pub const STORAGE_KEY: &str = "tokenAddresses";
pub const DEFAULT_TOKEN_STORE: &str = "token-registry.json";
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 15;

lazy_static::lazy_static! {
    pub static ref WALLET_DETECTOR: Address =
        address!("0xeca4b0bdbf7c55e9b7925919d03cbf8dc82537e8");
    pub static ref GUARDIAN_STORAGE: Address =
        address!("0xff5a7299ff6f0fbaad9b38906b77d08c0fbdc9a7");
    pub static ref DEFAULT_TOKENS: Vec<TokenAddress> = vec![
        // BAT
        "0x0D8775F648430679A709E98d2b0Cb6250d2887EF".into(),
        // DAI
        "0x6B175474E89094C44Da98b954EedeAC495271d0F".into(),
    ];
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable `{0}` not found")]
    Missing(&'static str),
    #[error("Environment variable `{0}` has an invalid value `{1}`")]
    Invalid(&'static str, String),
}

macro_rules! dotenv {
    ($var: expr) => {
        std::env::var($var).map_err(|_| ConfigError::Missing($var))
    };
}

macro_rules! dotenv_or {
    ($var: expr, $parse: expr, $default: expr) => {
        match std::env::var($var) {
            Ok(val) => $parse(val.as_str()).ok_or_else(|| ConfigError::Invalid($var, val.clone()))?,
            Err(_) => $default,
        }
    };
}

#[derive(Clone, Debug)]
pub struct Config {
    pub rpc_url: String,
    pub wallet_detector: Address,
    pub guardian_storage: Address,
    pub token_store: PathBuf,
    pub rpc_timeout: Duration,
}

impl Config {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            wallet_detector: *WALLET_DETECTOR,
            guardian_storage: *GUARDIAN_STORAGE,
            token_store: DEFAULT_TOKEN_STORE.into(),
            rpc_timeout: Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS),
        }
    }

    /// Reads `ETHEREUM_RPC` plus the optional overrides from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::new(dotenv!("ETHEREUM_RPC")?);

        Ok(Self {
            wallet_detector: dotenv_or!(
                "WALLET_DETECTOR",
                providers::address::parse_lenient,
                defaults.wallet_detector
            ),
            guardian_storage: dotenv_or!(
                "GUARDIAN_STORAGE",
                providers::address::parse_lenient,
                defaults.guardian_storage
            ),
            token_store: dotenv_or!(
                "TOKEN_STORE",
                |v: &str| Some(PathBuf::from(v)),
                defaults.token_store
            ),
            rpc_timeout: dotenv_or!(
                "RPC_TIMEOUT_SECS",
                |v: &str| v.parse::<u64>().ok().map(Duration::from_secs),
                defaults.rpc_timeout
            ),
            ..defaults
        })
    }
}

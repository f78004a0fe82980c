use serde::{Deserialize, Serialize};

pub use providers::{Address, ChecksumAddress, U256};

/// Raw registry entry; only checked when it is queried.
pub type TokenAddress = String;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub symbol: String,
    pub human_readable_balance: String,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub address: ChecksumAddress,
    pub is_known_wallet_contract: bool,
    pub native_balance: String,
    pub guardian_count: u64,
    pub token_balances: Vec<TokenBalance>,
}

#[derive(Deserialize, Debug)]
pub struct LookupRequest {
    pub address: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct TokenList {
    pub addresses: Vec<TokenAddress>,
}

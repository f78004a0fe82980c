use crate::{
    lookup::errors::LookupError,
    types::{Address, TokenBalance, U256},
};
use futures::future::try_join_all;
use providers::{
    address::parse_lenient,
    evm::{ERC20, GUARDIAN_STORAGE, WALLET_DETECTOR},
    format_units, ChainReader, Token,
};

fn single(mut output: Vec<Token>, method: &str) -> Result<Token, LookupError> {
    match (output.pop(), output.is_empty()) {
        (Some(token), true) => Ok(token),
        _ => Err(LookupError::ContractCall(format!(
            "`{method}` returned an unexpected number of values"
        ))),
    }
}

fn unexpected(method: &str, token: &Token) -> LookupError {
    LookupError::ContractCall(format!("`{method}` returned unexpected value {token:?}"))
}

async fn call_uint<R: ChainReader + ?Sized>(
    reader: &R,
    contract: Address,
    abi: &providers::Abi,
    method: &str,
    args: &[Token],
) -> Result<U256, LookupError> {
    let token = single(
        reader.call_read_only(contract, abi, method, args).await?,
        method,
    )?;

    match token {
        Token::Uint(value) => Ok(value),
        other => Err(unexpected(method, &other)),
    }
}

pub fn to_u64(value: U256) -> Result<u64, LookupError> {
    if value > U256::from(u64::MAX) {
        return Err(LookupError::Conversion(format!(
            "{value} does not fit in a 64-bit integer"
        )));
    }

    Ok(value.as_u64())
}

pub async fn is_known_wallet_contract<R: ChainReader + ?Sized>(
    reader: &R,
    detector: Address,
    address: Address,
) -> Result<bool, LookupError> {
    let method = "isArgentWallet";
    let token = single(
        reader
            .call_read_only(detector, &WALLET_DETECTOR, method, &[Token::Address(address)])
            .await?,
        method,
    )?;

    match token {
        Token::Bool(value) => Ok(value),
        other => Err(unexpected(method, &other)),
    }
}

pub async fn guardian_count<R: ChainReader + ?Sized>(
    reader: &R,
    guardian_storage: Address,
    address: Address,
) -> Result<u64, LookupError> {
    let count = call_uint(
        reader,
        guardian_storage,
        &GUARDIAN_STORAGE,
        "guardianCount",
        &[Token::Address(address)],
    )
    .await?;

    to_u64(count)
}

/// Queries symbol, decimals and balance of `owner` in this order. Any failing
/// call fails the whole entry.
pub async fn token_balance<R: ChainReader + ?Sized>(
    reader: &R,
    token: &str,
    owner: Address,
) -> Result<TokenBalance, LookupError> {
    let contract = parse_lenient(token)
        .ok_or_else(|| LookupError::ContractCall(format!("`{token}` is not a token address")))?;

    let symbol = match single(
        reader.call_read_only(contract, &ERC20, "symbol", &[]).await?,
        "symbol",
    )? {
        Token::String(symbol) => symbol,
        other => return Err(unexpected("symbol", &other)),
    };

    let decimals = call_uint(reader, contract, &ERC20, "decimals", &[]).await?;
    let decimals = u8::try_from(to_u64(decimals)?).map_err(|_| {
        LookupError::Conversion(format!("{symbol} declares {decimals} decimals"))
    })?;

    let balance = call_uint(
        reader,
        contract,
        &ERC20,
        "balanceOf",
        &[Token::Address(owner)],
    )
    .await?;

    log::debug!("{symbol} ({token}): {balance} with {decimals} decimals");

    Ok(TokenBalance {
        symbol,
        human_readable_balance: format_units(balance, decimals),
    })
}

/// Looks up every token concurrently. The result keeps the order of `tokens`
/// and fails as soon as one lookup fails.
pub async fn token_balances<R: ChainReader + ?Sized>(
    reader: &R,
    tokens: &[String],
    owner: Address,
) -> Result<Vec<TokenBalance>, LookupError> {
    try_join_all(tokens.iter().map(|token| token_balance(reader, token, owner))).await
}

pub mod errors;
pub mod queries;

use crate::{
    config::Config,
    registry::{KeyValueStore, TokenRegistry},
    types::{AccountInfo, ChecksumAddress},
};
use errors::LookupError;
use providers::{evm::NATIVE_DECIMALS, format_units, normalize, ChainReader, Connector};

pub struct Inspector<C, S> {
    config: Config,
    connector: C,
    registry: TokenRegistry<S>,
}

impl<C: Connector, S: KeyValueStore> Inspector<C, S> {
    pub fn new(config: Config, connector: C, registry: TokenRegistry<S>) -> Self {
        Self {
            config,
            connector,
            registry,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &TokenRegistry<S> {
        &self.registry
    }

    /// Validates `raw` before anything touches the network, then runs a full
    /// lookup over a fresh connection.
    pub async fn submit(&self, raw: &str) -> Result<AccountInfo, LookupError> {
        let address = normalize(raw)?;
        let reader = self.connector.connect(&self.config.rpc_url)?;

        lookup(&reader, &self.config, &self.registry, address).await
    }
}

/// Either every query succeeds and a complete [`AccountInfo`] is returned, or
/// the first error is.
pub async fn lookup<R, S>(
    reader: &R,
    config: &Config,
    registry: &TokenRegistry<S>,
    address: ChecksumAddress,
) -> Result<AccountInfo, LookupError>
where
    R: ChainReader + ?Sized,
    S: KeyValueStore,
{
    let owner = address.address();

    let native = reader.get_native_balance(owner).await?;
    log::debug!("{address}: native balance {native}");

    let is_known_wallet_contract =
        queries::is_known_wallet_contract(reader, config.wallet_detector, owner).await?;
    log::debug!("{address}: known wallet {is_known_wallet_contract}");

    let guardian_count = queries::guardian_count(reader, config.guardian_storage, owner).await?;
    log::debug!("{address}: {guardian_count} guardians");

    let tokens = registry.load()?;
    let token_balances = queries::token_balances(reader, &tokens, owner).await?;

    Ok(AccountInfo {
        address,
        is_known_wallet_contract,
        native_balance: format_units(native, NATIVE_DECIMALS),
        guardian_count,
        token_balances,
    })
}

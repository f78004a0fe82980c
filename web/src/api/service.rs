use providers::Web3Connector;
use std::sync::Mutex;
use wallet_inspector::{
    current,
    registry::{FileStore, StoreError},
    run_submission,
    types::TokenList,
    Config, Inspector, TokenRegistry, ViewModel, ViewSnapshot,
};

pub struct AppState {
    pub inspector: Inspector<Web3Connector, FileStore>,
    pub view: Mutex<ViewModel>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let connector = Web3Connector::new(config.rpc_timeout);
        let registry = TokenRegistry::new(FileStore::new(&config.token_store));

        Self {
            inspector: Inspector::new(config, connector, registry),
            view: Mutex::new(ViewModel::default()),
        }
    }
}

pub async fn account_info(state: &AppState, address: &str) -> ViewSnapshot {
    run_submission(&state.view, &state.inspector, address.trim()).await
}

pub fn view_state(state: &AppState) -> ViewSnapshot {
    current(&state.view)
}

pub fn tokens(state: &AppState) -> Result<TokenList, StoreError> {
    Ok(TokenList {
        addresses: state.inspector.registry().load()?,
    })
}

pub fn replace_tokens(state: &AppState, list: TokenList) -> Result<TokenList, StoreError> {
    let addresses: Vec<String> = list
        .addresses
        .iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect();

    state.inspector.registry().save(&addresses)?;
    log::info!("token registry now holds {} entries", addresses.len());

    Ok(TokenList { addresses })
}

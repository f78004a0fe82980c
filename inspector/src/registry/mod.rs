pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

use crate::{
    config::{DEFAULT_TOKENS, STORAGE_KEY},
    types::TokenAddress,
};

const DELIMITER: &str = ",";

/// User-editable list of token contracts, kept in a [`KeyValueStore`].
pub struct TokenRegistry<S> {
    store: S,
    defaults: Vec<TokenAddress>,
}

impl<S: KeyValueStore> TokenRegistry<S> {
    pub fn new(store: S) -> Self {
        Self::with_defaults(store, DEFAULT_TOKENS.clone())
    }

    pub fn with_defaults(store: S, defaults: Vec<TokenAddress>) -> Self {
        Self { store, defaults }
    }

    /// Returns the stored list, seeding the store with the defaults on first
    /// use. Entries are not validated here.
    pub fn load(&self) -> Result<Vec<TokenAddress>, StoreError> {
        match self.store.get(STORAGE_KEY)? {
            Some(value) => Ok(split(&value)),
            None => {
                log::info!("seeding token registry with {} defaults", self.defaults.len());
                self.save(&self.defaults)?;

                Ok(self.defaults.clone())
            }
        }
    }

    pub fn save(&self, tokens: &[TokenAddress]) -> Result<(), StoreError> {
        self.store.set(STORAGE_KEY, &tokens.join(DELIMITER))
    }
}

fn split(value: &str) -> Vec<TokenAddress> {
    if value.is_empty() {
        return Vec::new();
    }

    value.split(DELIMITER).map(String::from).collect()
}

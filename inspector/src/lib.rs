#![deny(clippy::dbg_macro)]

pub mod config;
pub mod lookup;
pub mod registry;
pub mod types;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use lookup::{errors::LookupError, Inspector};
pub use registry::TokenRegistry;
pub use view::{current, run_submission, ViewModel, ViewSnapshot, ViewState};

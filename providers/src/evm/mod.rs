pub mod general;

pub use general::{ProviderError, Web3Connector, Web3Reader};

use web3::{ethabi::Contract, types::U256};

const ERC20_ABI: &[u8] = include_bytes!("../../abi/erc20.json");
const WALLET_DETECTOR_ABI: &[u8] = include_bytes!("../../abi/wallet_detector.json");
const GUARDIAN_STORAGE_ABI: &[u8] = include_bytes!("../../abi/guardian_storage.json");

pub const NATIVE_DECIMALS: u8 = 18;

lazy_static::lazy_static! {
    pub static ref ERC20: Contract =
        Contract::load(ERC20_ABI).expect("Invalid ERC20 ABI");
    pub static ref WALLET_DETECTOR: Contract =
        Contract::load(WALLET_DETECTOR_ABI).expect("Invalid wallet detector ABI");
    pub static ref GUARDIAN_STORAGE: Contract =
        Contract::load(GUARDIAN_STORAGE_ABI).expect("Invalid guardian storage ABI");
}

/// Renders a raw integer amount as a decimal string scaled by `10^-decimals`.
///
/// Trailing fractional zeros are dropped, but at least one fractional digit
/// is always kept, so whole amounts read as `"1.0"`.
pub fn format_units(value: U256, decimals: u8) -> String {
    let decimals = decimals as usize;
    let digits = value.to_string();
    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{fraction}")
    }
}

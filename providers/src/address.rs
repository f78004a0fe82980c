use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;
use web3::{signing::keccak256, types::Address};

const HEX_LEN: usize = 40;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address `{0}` must have 40 hex digits")]
    Length(String),
    #[error("Address `{0}` contains non-hex characters")]
    NonHex(String),
    #[error("Address `{0}` has an invalid checksum")]
    Checksum(String),
}

/// An account address that passed validation, displayed in its EIP-55 form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChecksumAddress(Address);

impl ChecksumAddress {
    pub fn address(&self) -> Address {
        self.0
    }
}

impl From<ChecksumAddress> for Address {
    fn from(value: ChecksumAddress) -> Self {
        value.0
    }
}

impl fmt::Display for ChecksumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_checksum(&self.0))
    }
}

impl Serialize for ChecksumAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn strip_prefix(raw: &str) -> &str {
    raw.strip_prefix("0x").unwrap_or(raw)
}

fn checksum_body(lower: &str) -> String {
    let hash = keccak256(lower.as_bytes());

    lower
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };

            if c.is_ascii_alphabetic() && nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

pub fn to_checksum(address: &Address) -> String {
    format!("0x{}", checksum_body(&format!("{address:x}")))
}

/// Parses an address-shaped string without checking its case.
pub fn parse_lenient(raw: &str) -> Option<Address> {
    let body = strip_prefix(raw);

    if body.len() != HEX_LEN {
        return None;
    }

    hex::decode(body).ok().map(|bytes| Address::from_slice(&bytes))
}

/// Validates `raw` and returns its canonical checksummed form.
///
/// Bodies written entirely in one case carry no checksum and are accepted as
/// is; mixed-case bodies must match the EIP-55 checksum exactly.
pub fn normalize(raw: &str) -> Result<ChecksumAddress, AddressError> {
    let body = strip_prefix(raw);

    if body.len() != HEX_LEN {
        return Err(AddressError::Length(raw.to_string()));
    }

    if !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AddressError::NonHex(raw.to_string()));
    }

    let lower = body.to_ascii_lowercase();
    let mixed_case = body.chars().any(|c| c.is_ascii_lowercase())
        && body.chars().any(|c| c.is_ascii_uppercase());

    if mixed_case && checksum_body(&lower) != body {
        return Err(AddressError::Checksum(raw.to_string()));
    }

    let bytes = hex::decode(&lower).map_err(|_| AddressError::NonHex(raw.to_string()))?;

    Ok(ChecksumAddress(Address::from_slice(&bytes)))
}

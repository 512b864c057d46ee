//! Core chain types.
//!
//! This module contains the value types shared by the pipeline stages:
//! addresses, network identifiers and coin amounts.

mod address;
mod amount;
mod network;

pub use address::{Address, ADDRESS_LENGTH};
pub use amount::{Amount, CORE_DECIMALS, MAX_AMOUNT_EXPONENT};
pub use network::NetworkId;

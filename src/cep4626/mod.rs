//! CEP-4626: Tokenized Vault Standard for Casper
//!
//! Shared pieces of the standard used by the yield vault: the share/asset
//! conversion math with explicit rounding, and the `Deposit`/`Withdraw`
//! events every conforming vault emits.

pub mod conversion;
pub mod events;

pub use conversion::{assets_to_shares, mul_div, shares_to_assets, Rounding};
pub use events::*;

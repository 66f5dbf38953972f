//! Events for CEP-4626 Tokenized Vaults

use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when assets are deposited into the vault
#[odra::event]
pub struct Deposit {
    /// Address that called deposit or mint
    pub sender: Address,
    /// Address that received the shares
    pub receiver: Address,
    /// Amount of assets deposited
    pub assets: U256,
    /// Amount of shares minted
    pub shares: U256,
}

/// Event emitted when assets leave the vault
#[odra::event]
pub struct Withdraw {
    /// Address that called withdraw or redeem
    pub sender: Address,
    /// Address that received the assets
    pub receiver: Address,
    /// Address whose shares were burned
    pub owner: Address,
    /// Amount of assets withdrawn
    pub assets: U256,
    /// Amount of shares burned
    pub shares: U256,
}

//! Price Oracle - asset prices for display and treasury valuation
//!
//! Vaults only keep the address of the feed registered for their asset;
//! share conversion never depends on a price.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::OracleError;

/// Latest price reported for an asset
#[odra::odra_type]
pub struct PriceQuote {
    /// Price scaled by `10^decimals`
    pub value: U256,
    /// Number of decimals in `value`
    pub decimals: u8,
    /// Block time of the last update
    pub updated_at: u64,
}

/// External interface of a price feed
#[odra::external_contract]
pub trait PriceFeed {
    fn latest_price(&self, asset: Address) -> PriceQuote;
}

/// Price feed whose prices are posted by an admin
#[odra::module]
pub struct ManualPriceFeed {
    /// Latest quote per asset
    quotes: Mapping<Address, PriceQuote>,
    /// Admin address
    admin: Var<Address>,
}

#[odra::module]
impl ManualPriceFeed {
    /// Initialize the feed with the caller as admin
    pub fn init(&mut self) {
        let caller = self.env().caller();
        self.admin.set(caller);
    }

    /// Post a price for an asset (admin only)
    ///
    /// # Arguments
    /// * `asset` - Asset address
    /// * `value` - Price scaled by `10^decimals`
    /// * `decimals` - Scale of `value`
    pub fn set_price(&mut self, asset: Address, value: U256, decimals: u8) {
        self.only_admin();

        if value.is_zero() {
            self.env().revert(OracleError::InvalidPrice);
        }

        let quote = PriceQuote {
            value,
            decimals,
            updated_at: self.env().get_block_time(),
        };
        self.quotes.set(&asset, quote);
    }

    /// Latest quote for an asset
    pub fn latest_price(&self, asset: Address) -> PriceQuote {
        self.quotes.get(&asset)
            .unwrap_or_revert_with(&self.env(), OracleError::PriceUnavailable)
    }

    pub fn has_price(&self, asset: Address) -> bool {
        self.quotes.get(&asset).is_some()
    }

    pub fn admin(&self) -> Address {
        self.admin.get_or_revert_with(OracleError::Unauthorized)
    }

    fn only_admin(&self) {
        let caller = self.env().caller();
        if caller != self.admin() {
            self.env().revert(OracleError::Unauthorized);
        }
    }
}

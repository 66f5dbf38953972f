//! Yield Vault - CEP-4626 vault with venue allocation bookkeeping
//!
//! Users deposit the underlying asset and receive shares. The owner can move
//! idle principal into two external venues and back. Accounted assets are
//! idle custody plus the principal tracked per venue, so moving principal
//! never changes the share price. Yield earned inside a venue is not
//! recognized.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::cep4626::{
    assets_to_shares, shares_to_assets, Deposit as Cep4626Deposit, Rounding,
    Withdraw as Cep4626Withdraw,
};
use crate::errors::VaultError;
use crate::events::{
    PauseToggled, ProtocolAllocationSet, ProtocolDeployed, ProtocolWithdrawn,
    VenueWiringRefreshed,
};
use crate::factory::VenueRegistryContractRef;
use crate::oracle::{PriceFeedContractRef, PriceQuote};
use crate::token::{Cep18TokenContractRef, TokenLedger};
use crate::venue::{Venue, YieldVenueContractRef};

/// Per-owner yield vault
#[odra::module(factory=on)]
pub struct YieldVault {
    /// Share ledger
    shares: SubModule<TokenLedger>,
    /// Underlying asset token
    asset: Var<Address>,
    /// Creator of the vault, sole holder of privileged operations
    owner: Var<Address>,
    /// Factory the vault was created by
    factory: Var<Address>,
    /// Paused state
    paused: Var<bool>,
    /// Venue A adapter, snapshotted at creation
    venue_a: Var<Option<Address>>,
    /// Venue B adapter, snapshotted at creation
    venue_b: Var<Option<Address>>,
    /// Price feed for the asset, fixed at creation
    price_feed: Var<Option<Address>>,
    /// Principal deployed to Venue A
    deployed_to_venue_a: Var<U256>,
    /// Principal deployed to Venue B
    deployed_to_venue_b: Var<U256>,
    /// Advisory allocation targets by protocol name
    allocation_targets: Mapping<String, U256>,
}

#[odra::module(factory=on)]
impl YieldVault {
    /// Initialize the vault
    ///
    /// `owner` is passed explicitly because the caller is the factory.
    pub fn init(
        &mut self,
        asset: Address,
        name: String,
        symbol: String,
        owner: Address,
        factory: Address,
        venue_a: Option<Address>,
        venue_b: Option<Address>,
        price_feed: Option<Address>,
    ) {
        let decimals = Cep18TokenContractRef::new(self.env(), asset).decimals();
        self.shares.init(name, symbol, decimals);

        self.asset.set(asset);
        self.owner.set(owner);
        self.factory.set(factory);
        self.paused.set(false);
        self.venue_a.set(venue_a);
        self.venue_b.set(venue_b);
        self.price_feed.set(price_feed);
        self.deployed_to_venue_a.set(U256::zero());
        self.deployed_to_venue_b.set(U256::zero());
    }

    // ========================================
    // Share Token (CEP-18)
    // ========================================

    pub fn name(&self) -> String {
        self.shares.name()
    }

    pub fn symbol(&self) -> String {
        self.shares.symbol()
    }

    pub fn decimals(&self) -> u8 {
        self.shares.decimals()
    }

    pub fn total_supply(&self) -> U256 {
        self.shares.total_supply()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.shares.balance_of(owner)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.shares.allowance(owner, spender)
    }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        self.shares.transfer(to, amount)
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        self.shares.approve(spender, amount)
    }

    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        self.shares.transfer_from(from, to, amount)
    }

    // ========================================
    // Vault Metadata
    // ========================================

    pub fn asset(&self) -> Address {
        self.asset.get_or_revert_with(VaultError::InvalidConfiguration)
    }

    pub fn owner(&self) -> Address {
        self.owner.get_or_revert_with(VaultError::InvalidConfiguration)
    }

    pub fn factory(&self) -> Address {
        self.factory.get_or_revert_with(VaultError::InvalidConfiguration)
    }

    /// Asset held directly by the vault
    pub fn idle_balance(&self) -> U256 {
        self.asset_token().balance_of(self.env().self_address())
    }

    /// Idle balance plus principal deployed to both venues
    ///
    /// Venue-side appreciation is not included.
    pub fn total_assets(&self) -> U256 {
        let deployed = self.deployed_to_venue_a.get_or_default() + self.deployed_to_venue_b.get_or_default();
        self.idle_balance() + deployed
    }

    // ========================================
    // Conversion
    // ========================================

    pub fn convert_to_shares(&self, assets: U256) -> U256 {
        self.to_shares(assets, Rounding::Down)
    }

    pub fn convert_to_assets(&self, shares: U256) -> U256 {
        self.to_assets(shares, Rounding::Down)
    }

    pub fn preview_deposit(&self, assets: U256) -> U256 {
        self.to_shares(assets, Rounding::Down)
    }

    pub fn preview_mint(&self, shares: U256) -> U256 {
        self.to_assets(shares, Rounding::Up)
    }

    pub fn preview_withdraw(&self, assets: U256) -> U256 {
        self.to_shares(assets, Rounding::Up)
    }

    pub fn preview_redeem(&self, shares: U256) -> U256 {
        self.to_assets(shares, Rounding::Down)
    }

    // ========================================
    // Limits
    // ========================================

    pub fn max_deposit(&self, _receiver: Address) -> U256 {
        if self.is_paused() {
            return U256::zero();
        }
        U256::MAX
    }

    pub fn max_mint(&self, _receiver: Address) -> U256 {
        if self.is_paused() {
            return U256::zero();
        }
        U256::MAX
    }

    /// Assets the owner's shares are worth
    ///
    /// Not capped by idle liquidity: `withdraw` can still revert with
    /// `InsufficientIdleBalance` while principal sits in venues.
    pub fn max_withdraw(&self, owner: Address) -> U256 {
        if self.is_paused() {
            return U256::zero();
        }
        self.convert_to_assets(self.balance_of(owner))
    }

    pub fn max_redeem(&self, owner: Address) -> U256 {
        if self.is_paused() {
            return U256::zero();
        }
        self.balance_of(owner)
    }

    // ========================================
    // Deposit / Mint / Withdraw / Redeem
    // ========================================

    /// Deposits `assets` from the caller and mints shares to `receiver`
    ///
    /// Returns the amount of shares minted.
    pub fn deposit(&mut self, assets: U256, receiver: Address) -> U256 {
        self.ensure_not_paused();
        if assets.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }

        let shares = self.preview_deposit(assets);
        if shares.is_zero() {
            self.env().revert(VaultError::ZeroShares);
        }

        self.pull_and_mint(assets, shares, receiver);
        shares
    }

    /// Mints exactly `shares` to `receiver`, charging the caller the rounded-up cost
    ///
    /// Returns the amount of assets deposited.
    pub fn mint(&mut self, shares: U256, receiver: Address) -> U256 {
        self.ensure_not_paused();
        if shares.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }

        let assets = self.preview_mint(shares);
        self.pull_and_mint(assets, shares, receiver);
        assets
    }

    /// Sends `assets` to `receiver`, burning shares from `owner`
    ///
    /// Returns the amount of shares burned.
    pub fn withdraw(&mut self, assets: U256, receiver: Address, owner: Address) -> U256 {
        self.ensure_not_paused();
        if assets.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }

        let shares = self.preview_withdraw(assets);
        self.burn_and_send(assets, shares, receiver, owner);
        shares
    }

    /// Burns exactly `shares` from `owner` and sends their value to `receiver`
    ///
    /// Returns the amount of assets sent.
    pub fn redeem(&mut self, shares: U256, receiver: Address, owner: Address) -> U256 {
        self.ensure_not_paused();
        if shares.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }

        let assets = self.preview_redeem(shares);
        if assets.is_zero() {
            self.env().revert(VaultError::ZeroAssets);
        }

        self.burn_and_send(assets, shares, receiver, owner);
        assets
    }

    // ========================================
    // Venue Allocation (Owner Only)
    // ========================================

    /// Moves `amount` of idle principal into a venue
    pub fn deploy_to_venue(&mut self, venue: Venue, amount: U256) {
        self.only_owner();
        self.ensure_not_paused();
        if amount.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        let venue_address = self.configured_venue(&venue);
        if amount > self.idle_balance() {
            self.env().revert(VaultError::InsufficientBalance);
        }

        self.asset_token().approve(venue_address, amount);
        YieldVenueContractRef::new(self.env(), venue_address).supply(amount);

        let deployed = self.get_venue_balance(venue.clone());
        self.set_deployed(&venue, deployed + amount);

        self.env().emit_event(ProtocolDeployed {
            venue: venue.name(),
            amount,
        });
    }

    /// Pulls `amount` of tracked principal back from a venue into idle custody
    pub fn withdraw_from_venue(&mut self, venue: Venue, amount: U256) {
        self.only_owner();
        self.ensure_not_paused();
        if amount.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        let venue_address = self.configured_venue(&venue);
        let deployed = self.get_venue_balance(venue.clone());
        if amount > deployed {
            self.env().revert(VaultError::InsufficientBalance);
        }

        YieldVenueContractRef::new(self.env(), venue_address).redeem(amount);
        self.set_deployed(&venue, deployed - amount);

        self.env().emit_event(ProtocolWithdrawn {
            venue: venue.name(),
            amount,
        });
    }

    /// Principal tracked as deployed to a venue
    pub fn get_venue_balance(&self, venue: Venue) -> U256 {
        match venue {
            Venue::A => self.deployed_to_venue_a.get_or_default(),
            Venue::B => self.deployed_to_venue_b.get_or_default(),
        }
    }

    pub fn venue_address(&self, venue: Venue) -> Option<Address> {
        match venue {
            Venue::A => self.venue_a.get_or_default(),
            Venue::B => self.venue_b.get_or_default(),
        }
    }

    /// Copies the factory's current venue addresses into this vault
    ///
    /// Slots the factory has not configured keep their current address.
    pub fn refresh_venue_addresses(&mut self) {
        self.only_owner();

        let registry = VenueRegistryContractRef::new(self.env(), self.factory());
        let latest_a = registry.get_venue_a_address();
        let latest_b = registry.get_venue_b_address();

        self.rewire(Venue::A, latest_a);
        self.rewire(Venue::B, latest_b);

        self.env().emit_event(VenueWiringRefreshed {
            venue_a: self.venue_a.get_or_default(),
            venue_b: self.venue_b.get_or_default(),
        });
    }

    /// Records an advisory allocation target; never read by transfers
    pub fn set_protocol_allocation(&mut self, name: String, amount: U256) {
        self.only_owner();
        if name.is_empty() {
            self.env().revert(VaultError::EmptyProtocolName);
        }

        self.allocation_targets.set(&name, amount);
        self.env().emit_event(ProtocolAllocationSet { name, amount });
    }

    pub fn get_protocol_allocation(&self, name: String) -> U256 {
        self.allocation_targets.get(&name).unwrap_or_default()
    }

    // ========================================
    // Price Feed
    // ========================================

    pub fn price_feed(&self) -> Option<Address> {
        self.price_feed.get_or_default()
    }

    /// Latest price of the asset from the feed wired in at creation
    pub fn latest_asset_price(&self) -> PriceQuote {
        let feed = self.price_feed()
            .unwrap_or_revert_with(&self.env(), VaultError::PriceFeedNotSet);
        PriceFeedContractRef::new(self.env(), feed).latest_price(self.asset())
    }

    // ========================================
    // Admin Functions
    // ========================================

    pub fn pause(&mut self) {
        self.only_owner();
        self.paused.set(true);
        self.env().emit_event(PauseToggled { paused: true });
    }

    pub fn unpause(&mut self) {
        self.only_owner();
        self.paused.set(false);
        self.env().emit_event(PauseToggled { paused: false });
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }
}

impl YieldVault {
    fn asset_token(&self) -> Cep18TokenContractRef {
        Cep18TokenContractRef::new(self.env(), self.asset())
    }

    fn to_shares(&self, assets: U256, rounding: Rounding) -> U256 {
        assets_to_shares(assets, self.total_assets(), self.total_supply(), rounding)
            .unwrap_or_revert(&self.env())
    }

    fn to_assets(&self, shares: U256, rounding: Rounding) -> U256 {
        shares_to_assets(shares, self.total_assets(), self.total_supply(), rounding)
            .unwrap_or_revert(&self.env())
    }

    fn pull_and_mint(&mut self, assets: U256, shares: U256, receiver: Address) {
        let caller = self.env().caller();
        let vault = self.env().self_address();
        self.asset_token().transfer_from(caller, vault, assets);

        self.shares.mint(receiver, shares);

        self.env().emit_event(Cep4626Deposit {
            sender: caller,
            receiver,
            assets,
            shares,
        });
    }

    fn burn_and_send(&mut self, assets: U256, shares: U256, receiver: Address, owner: Address) {
        let caller = self.env().caller();

        if assets > self.idle_balance() {
            self.env().revert(VaultError::InsufficientIdleBalance);
        }

        if caller != owner {
            if self.allowance(owner, caller) < shares {
                self.env().revert(VaultError::InsufficientAllowance);
            }
            self.shares.spend_allowance(owner, caller, shares);
        }

        if self.balance_of(owner) < shares {
            self.env().revert(VaultError::InsufficientShares);
        }
        self.shares.burn(owner, shares);

        self.asset_token().transfer(receiver, assets);

        self.env().emit_event(Cep4626Withdraw {
            sender: caller,
            receiver,
            owner,
            assets,
            shares,
        });
    }

    fn configured_venue(&self, venue: &Venue) -> Address {
        self.venue_address(venue.clone())
            .unwrap_or_revert_with(&self.env(), VaultError::VenueAddressNotSet)
    }

    fn set_deployed(&mut self, venue: &Venue, amount: U256) {
        match venue {
            Venue::A => self.deployed_to_venue_a.set(amount),
            Venue::B => self.deployed_to_venue_b.set(amount),
        }
    }

    fn rewire(&mut self, venue: Venue, latest: Option<Address>) {
        let Some(latest) = latest else {
            return;
        };
        let current = self.venue_address(venue.clone());
        if current == Some(latest) {
            return;
        }
        if !self.get_venue_balance(venue.clone()).is_zero() {
            self.env().revert(VaultError::VenueHasDeployedPrincipal);
        }
        match venue {
            Venue::A => self.venue_a.set(Some(latest)),
            Venue::B => self.venue_b.set(Some(latest)),
        }
    }

    fn only_owner(&self) {
        let caller = self.env().caller();
        if caller != self.owner() {
            self.env().revert(VaultError::NotOwner);
        }
    }

    fn ensure_not_paused(&self) {
        if self.is_paused() {
            self.env().revert(VaultError::ContractPaused);
        }
    }
}

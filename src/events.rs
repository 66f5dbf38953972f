//! Event definitions for the vault contracts
use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when tokens are transferred, minted or burned
#[odra::event]
pub struct Transfer {
    /// From address
    pub from: Address,
    /// To address
    pub to: Address,
    /// Amount transferred
    pub value: U256,
}

/// Event emitted when approval is granted
#[odra::event]
pub struct Approval {
    /// Owner address
    pub owner: Address,
    /// Spender address
    pub spender: Address,
    /// Amount approved
    pub value: U256,
}

/// Event emitted when a user record is created
#[odra::event]
pub struct UserRegistered {
    /// Registered address
    pub user: Address,
    /// Chosen username
    pub username: String,
    /// Block time of registration
    pub timestamp: u64,
}

/// Event emitted when the factory creates a vault
#[odra::event]
pub struct VaultCreated {
    /// Owner of the new vault
    pub owner: Address,
    /// Address of the new vault
    pub vault: Address,
    /// Underlying asset
    pub asset: Address,
    /// Total number of vaults
    pub vault_count: u32,
}

/// Event emitted when the factory's venue configuration changes
#[odra::event]
pub struct VenueAddressSet {
    /// Venue name
    pub venue: String,
    /// New adapter address
    pub address: Address,
}

/// Event emitted when a price feed is registered for an asset
#[odra::event]
pub struct PriceFeedSet {
    pub asset: Address,
    pub feed: Address,
}

/// Event emitted when principal moves from idle custody into a venue
#[odra::event]
pub struct ProtocolDeployed {
    /// Venue name
    pub venue: String,
    /// Principal moved
    pub amount: U256,
}

/// Event emitted when principal returns from a venue to idle custody
#[odra::event]
pub struct ProtocolWithdrawn {
    /// Venue name
    pub venue: String,
    /// Principal moved
    pub amount: U256,
}

/// Event emitted when the owner records an advisory allocation target
#[odra::event]
pub struct ProtocolAllocationSet {
    pub name: String,
    pub amount: U256,
}

/// Event emitted when a vault re-reads venue addresses from its factory
#[odra::event]
pub struct VenueWiringRefreshed {
    pub venue_a: Option<Address>,
    pub venue_b: Option<Address>,
}

/// Event emitted when a vault is paused or unpaused
#[odra::event]
pub struct PauseToggled {
    pub paused: bool,
}

//! Factory contract for yield vaults
//!
//! The Factory is responsible for:
//! - Registering users (username, bio, registration time)
//! - Creating vaults and indexing them per owner
//! - Holding the venue addresses and price feeds new vaults are wired with
use odra::prelude::*;
use odra::ContractRef;
use crate::errors::FactoryError;
use crate::events::{PriceFeedSet, UserRegistered, VaultCreated, VenueAddressSet};
use crate::venue::Venue;
use crate::vault::yield_vault::YieldVaultFactoryContractRef;

/// Maximum username length in characters
pub const MAX_USERNAME_CHARS: usize = 20;

/// Maximum bio length in characters
pub const MAX_BIO_CHARS: usize = 30;

/// Share metadata used by `create_vault`
pub const DEFAULT_VAULT_NAME: &str = "Yield Vault Share";
pub const DEFAULT_VAULT_SYMBOL: &str = "yvSHARE";

/// Directory entry for a registered user
#[odra::odra_type]
pub struct UserRecord {
    pub username: String,
    pub bio: String,
    /// Block time of registration
    pub registered_at: u64,
}

/// Factory contract for creating and indexing vaults
#[odra::module]
pub struct VaultFactory {
    /// Privileged controller of the global configuration
    controller: Var<Address>,
    /// Child-contract factory that deploys `YieldVault` instances
    vault_deployer: Var<Address>,
    /// Venue A adapter handed to new vaults
    venue_a: Var<Option<Address>>,
    /// Venue B adapter handed to new vaults
    venue_b: Var<Option<Address>>,
    /// Price feed per asset
    price_feeds: Mapping<Address, Address>,
    /// User directory
    users: Mapping<Address, UserRecord>,
    /// Vaults created by each owner, in creation order
    user_vaults: Mapping<Address, Vec<Address>>,
    /// List of all vaults (stored as index -> address)
    all_vaults: Mapping<u32, Address>,
    /// Total number of vaults
    all_vaults_length: Var<u32>,
}

#[odra::module]
impl VaultFactory {
    /// Initialize the factory; the caller becomes the controller
    pub fn init(&mut self, vault_deployer: Address) {
        let caller = self.env().caller();
        self.controller.set(caller);
        self.vault_deployer.set(vault_deployer);
        self.venue_a.set(None);
        self.venue_b.set(None);
        self.all_vaults_length.set(0);
    }

    // ============ User Directory ============

    /// Create the caller's user record
    pub fn register_user(&mut self, username: String, bio: String) {
        let caller = self.env().caller();

        if username.is_empty() {
            self.env().revert(FactoryError::EmptyUsername);
        }
        if username.chars().count() > MAX_USERNAME_CHARS {
            self.env().revert(FactoryError::UsernameTooLong);
        }
        if bio.chars().count() > MAX_BIO_CHARS {
            self.env().revert(FactoryError::BioTooLong);
        }
        if self.is_user_registered(caller) {
            self.env().revert(FactoryError::AlreadyRegistered);
        }

        let timestamp = self.env().get_block_time();
        self.users.set(&caller, UserRecord {
            username: username.clone(),
            bio,
            registered_at: timestamp,
        });

        self.env().emit_event(UserRegistered {
            user: caller,
            username,
            timestamp,
        });
    }

    pub fn is_user_registered(&self, user: Address) -> bool {
        self.users.get(&user).is_some()
    }

    pub fn get_user_info(&self, user: Address) -> UserRecord {
        self.users.get(&user)
            .unwrap_or_revert_with(&self.env(), FactoryError::NotRegistered)
    }

    pub fn get_username(&self, user: Address) -> String {
        self.get_user_info(user).username
    }

    pub fn get_bio(&self, user: Address) -> String {
        self.get_user_info(user).bio
    }

    pub fn get_registration_timestamp(&self, user: Address) -> u64 {
        self.get_user_info(user).registered_at
    }

    // ============ Vault Provisioning ============

    /// Create a vault for `asset` with default share metadata
    pub fn create_vault(&mut self, asset: Address) -> Address {
        self.deploy_vault(
            asset,
            String::from(DEFAULT_VAULT_NAME),
            String::from(DEFAULT_VAULT_SYMBOL),
        )
    }

    /// Create a vault for `asset` with custom share metadata
    pub fn create_named_vault(&mut self, asset: Address, name: String, symbol: String) -> Address {
        if name.is_empty() || symbol.is_empty() {
            self.env().revert(FactoryError::InvalidVaultMetadata);
        }
        self.deploy_vault(asset, name, symbol)
    }

    /// Vaults created by `owner`, oldest first
    pub fn get_user_vaults(&self, owner: Address) -> Vec<Address> {
        self.user_vaults.get(&owner).unwrap_or_default()
    }

    /// Get vault by index
    pub fn all_vaults_at(&self, index: u32) -> Option<Address> {
        self.all_vaults.get(&index)
    }

    /// Get total number of vaults
    pub fn all_vaults_length(&self) -> u32 {
        self.all_vaults_length.get_or_default()
    }

    // ============ Global Configuration ============

    pub fn controller(&self) -> Address {
        self.controller.get_or_revert_with(FactoryError::InvalidConfiguration)
    }

    /// Hand control to a new address
    /// Only callable by the current controller
    pub fn set_controller(&mut self, new_controller: Address) {
        self.only_controller();
        self.controller.set(new_controller);
    }

    /// Only callable by the controller
    pub fn set_venue_a_address(&mut self, venue: Address) {
        self.only_controller();
        self.venue_a.set(Some(venue));
        self.env().emit_event(VenueAddressSet {
            venue: Venue::A.name(),
            address: venue,
        });
    }

    /// Only callable by the controller
    pub fn set_venue_b_address(&mut self, venue: Address) {
        self.only_controller();
        self.venue_b.set(Some(venue));
        self.env().emit_event(VenueAddressSet {
            venue: Venue::B.name(),
            address: venue,
        });
    }

    /// Only callable by the controller
    pub fn set_asset_price_feed(&mut self, asset: Address, feed: Address) {
        self.only_controller();
        self.price_feeds.set(&asset, feed);
        self.env().emit_event(PriceFeedSet { asset, feed });
    }

    pub fn get_venue_a_address(&self) -> Option<Address> {
        self.venue_a.get_or_default()
    }

    pub fn get_venue_b_address(&self) -> Option<Address> {
        self.venue_b.get_or_default()
    }

    pub fn get_asset_price_feed(&self, asset: Address) -> Option<Address> {
        self.price_feeds.get(&asset)
    }

    pub fn vault_deployer(&self) -> Address {
        self.vault_deployer.get_or_revert_with(FactoryError::InvalidConfiguration)
    }
}

impl VaultFactory {
    fn deploy_vault(&mut self, asset: Address, name: String, symbol: String) -> Address {
        let owner = self.env().caller();
        let index = self.all_vaults_length();

        // The vault gets a copy of the current configuration, not a live link
        let mut deployer = YieldVaultFactoryContractRef::new(self.env(), self.vault_deployer());
        let (vault, _access_uref) = deployer.new_contract(
            alloc::format!("yield_vault_{}", index),
            asset,
            name,
            symbol,
            owner,
            self.env().self_address(),
            self.get_venue_a_address(),
            self.get_venue_b_address(),
            self.get_asset_price_feed(asset),
        );

        let mut vaults = self.get_user_vaults(owner);
        vaults.push(vault);
        self.user_vaults.set(&owner, vaults);

        self.all_vaults.set(&index, vault);
        self.all_vaults_length.set(index + 1);

        self.env().emit_event(VaultCreated {
            owner,
            vault,
            asset,
            vault_count: index + 1,
        });

        vault
    }

    fn only_controller(&self) {
        let caller = self.env().caller();
        if caller != self.controller() {
            self.env().revert(FactoryError::Unauthorized);
        }
    }
}

/// Read-only view of the factory used by vaults to refresh venue wiring
#[odra::external_contract]
pub trait VenueRegistry {
    fn get_venue_a_address(&self) -> Option<Address>;
    fn get_venue_b_address(&self) -> Option<Address>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::yield_vault::YieldVaultFactory;
    use odra::host::{Deployer, HostEnv, HostRef, NoArgs};

    fn setup() -> (HostEnv, VaultFactoryHostRef) {
        let env = odra_test::env();
        let deployer = YieldVaultFactory::deploy(&env, NoArgs);
        let factory = VaultFactory::deploy(&env, VaultFactoryInitArgs {
            vault_deployer: deployer.address(),
        });
        (env, factory)
    }

    #[test]
    fn test_factory_init() {
        let (env, factory) = setup();
        assert_eq!(factory.controller(), env.get_account(0));
        assert_eq!(factory.get_venue_a_address(), None);
        assert_eq!(factory.get_venue_b_address(), None);
        assert_eq!(factory.all_vaults_length(), 0);
    }

    #[test]
    fn test_register_user() {
        let (env, mut factory) = setup();
        let alice = env.get_account(1);

        env.set_caller(alice);
        factory.register_user(String::from("Alice"), String::from("bio"));

        assert!(factory.is_user_registered(alice));
        assert_eq!(factory.get_username(alice), "Alice");
        assert_eq!(factory.get_bio(alice), "bio");
        let record = factory.get_user_info(alice);
        assert_eq!(factory.get_registration_timestamp(alice), record.registered_at);
        assert!(env.emitted(&factory, "UserRegistered"));
    }

    #[test]
    fn test_register_twice_fails() {
        let (env, mut factory) = setup();
        let alice = env.get_account(1);

        env.set_caller(alice);
        factory.register_user(String::from("Alice"), String::from("bio"));
        assert_eq!(
            factory.try_register_user(String::from("Mallory"), String::from("other")),
            Err(FactoryError::AlreadyRegistered.into())
        );
        assert_eq!(factory.get_username(alice), "Alice");
    }

    #[test]
    fn test_register_validates_lengths() {
        let (env, mut factory) = setup();
        env.set_caller(env.get_account(1));

        assert_eq!(
            factory.try_register_user(String::new(), String::from("bio")),
            Err(FactoryError::EmptyUsername.into())
        );
        assert_eq!(
            factory.try_register_user("a".repeat(21), String::new()),
            Err(FactoryError::UsernameTooLong.into())
        );
        assert_eq!(
            factory.try_register_user(String::from("bob"), "b".repeat(31)),
            Err(FactoryError::BioTooLong.into())
        );

        // Limits count characters, not bytes
        factory.register_user("é".repeat(20), "ü".repeat(30));
        assert_eq!(factory.get_username(env.get_account(1)).chars().count(), 20);
    }

    #[test]
    fn test_unknown_user_reads_fail() {
        let (env, factory) = setup();
        let stranger = env.get_account(3);

        assert!(!factory.is_user_registered(stranger));
        assert_eq!(factory.try_get_username(stranger), Err(FactoryError::NotRegistered.into()));
        assert_eq!(factory.try_get_bio(stranger), Err(FactoryError::NotRegistered.into()));
        assert_eq!(
            factory.try_get_registration_timestamp(stranger),
            Err(FactoryError::NotRegistered.into())
        );
        assert!(factory.get_user_vaults(stranger).is_empty());
    }

    #[test]
    fn test_configuration_is_controller_only() {
        let (env, mut factory) = setup();
        let venue_a = env.get_account(5);
        let venue_b = env.get_account(6);
        let asset = env.get_account(7);
        let feed = env.get_account(8);

        factory.set_venue_a_address(venue_a);
        factory.set_venue_b_address(venue_b);
        factory.set_asset_price_feed(asset, feed);
        assert_eq!(factory.get_venue_a_address(), Some(venue_a));
        assert_eq!(factory.get_venue_b_address(), Some(venue_b));
        assert_eq!(factory.get_asset_price_feed(asset), Some(feed));
        assert!(env.emitted(&factory, "VenueAddressSet"));
        assert!(env.emitted(&factory, "PriceFeedSet"));

        env.set_caller(env.get_account(1));
        assert_eq!(factory.try_set_venue_a_address(asset), Err(FactoryError::Unauthorized.into()));
        assert_eq!(factory.try_set_venue_b_address(asset), Err(FactoryError::Unauthorized.into()));
        assert_eq!(
            factory.try_set_asset_price_feed(asset, asset),
            Err(FactoryError::Unauthorized.into())
        );
    }

    #[test]
    fn test_set_controller() {
        let (env, mut factory) = setup();
        let new_controller = env.get_account(2);

        factory.set_controller(new_controller);
        assert_eq!(factory.controller(), new_controller);
        assert_eq!(factory.try_set_controller(env.get_account(0)), Err(FactoryError::Unauthorized.into()));
    }

    #[test]
    fn test_create_named_vault_rejects_empty_metadata() {
        let (env, mut factory) = setup();
        let asset = env.get_account(7);
        assert_eq!(
            factory.try_create_named_vault(asset, String::new(), String::from("yv")),
            Err(FactoryError::InvalidVaultMetadata.into())
        );
    }

    #[test]
    #[ignore = "Factory pattern not supported in Odra MockVM"]
    fn test_create_vault_indexes_by_owner() {
        let (env, mut factory) = setup();
        let alice = env.get_account(1);
        let asset = env.get_account(7);

        env.set_caller(alice);
        let first = factory.create_vault(asset);
        let second = factory.create_named_vault(asset, String::from("Alice Vault"), String::from("aVLT"));

        assert_eq!(factory.get_user_vaults(alice), vec![first, second]);
        assert_eq!(factory.all_vaults_length(), 2);
        assert_eq!(factory.all_vaults_at(0), Some(first));
    }
}

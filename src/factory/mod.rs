//! Vault factory: user directory, per-owner vault index, and the venue and
//! price-feed configuration handed to each new vault.

pub mod vault_factory;

pub use vault_factory::{UserRecord, VaultFactory, VenueRegistryContractRef};

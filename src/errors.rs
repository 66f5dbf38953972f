//! Error definitions for the vault contracts
use odra::prelude::*;

/// Errors raised by a yield vault
#[odra::odra_error]
pub enum VaultError {
    /// Amount is zero
    ZeroAmount = 1,

    /// Deposit would mint zero shares
    ZeroShares = 2,

    /// Redemption would return zero assets
    ZeroAssets = 3,

    /// Caller is not the vault owner
    NotOwner = 4,

    /// Vault is paused
    ContractPaused = 5,

    /// Idle balance cannot cover the withdrawal
    InsufficientIdleBalance = 6,

    /// Amount exceeds the idle balance or the tracked venue principal
    InsufficientBalance = 7,

    /// No address is configured for the venue
    VenueAddressNotSet = 8,

    /// Venue address cannot change while principal is deployed to it
    VenueHasDeployedPrincipal = 9,

    /// Owner does not hold enough shares
    InsufficientShares = 10,

    /// Caller's share allowance is too low
    InsufficientAllowance = 11,

    /// Protocol allocation name is empty
    EmptyProtocolName = 12,

    /// No price feed was wired in at creation
    PriceFeedNotSet = 13,

    /// Vault storage is not initialized
    InvalidConfiguration = 14,

    /// Overflow error
    MathOverflow = 15,

    /// Division by zero
    DivisionByZero = 16,
}

/// Errors raised by the vault factory
#[odra::odra_error]
pub enum FactoryError {
    /// Username is empty
    EmptyUsername = 100,

    /// Username exceeds 20 characters
    UsernameTooLong = 101,

    /// Bio exceeds 30 characters
    BioTooLong = 102,

    /// Caller already has a user record
    AlreadyRegistered = 103,

    /// No user record for the address
    NotRegistered = 104,

    /// Caller is not the controller
    Unauthorized = 105,

    /// Vault name or symbol is empty
    InvalidVaultMetadata = 106,

    /// Factory storage is not initialized
    InvalidConfiguration = 107,
}

/// Errors raised by CEP-18 ledgers
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 200,

    /// Insufficient balance for operation
    InsufficientBalance = 201,
}

/// Errors raised by the custody venue
#[odra::odra_error]
pub enum VenueError {
    /// Amount is zero
    ZeroAmount = 300,

    /// Caller holds fewer receipts than requested
    InsufficientReceipts = 301,

    /// Venue storage is not initialized
    InvalidConfiguration = 302,
}

/// Errors raised by the price feed
#[odra::odra_error]
pub enum OracleError {
    /// Price is zero
    InvalidPrice = 400,

    /// No price posted for the asset
    PriceUnavailable = 401,

    /// Caller is not the feed admin
    Unauthorized = 402,
}

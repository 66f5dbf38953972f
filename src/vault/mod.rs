//! Yield vault: CEP-4626 share accounting over an asset whose principal can
//! be parked in two external venues.

pub mod yield_vault;


pub use yield_vault::YieldVault;

#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

pub mod token;
pub mod tokens;
pub mod errors;
pub mod events;

// CEP-4626: Tokenized Vault Standard
pub mod cep4626;

// External collaborators: yield venues and price feeds
pub mod venue;
pub mod oracle;

// Vault and its factory
pub mod vault;
pub mod factory;

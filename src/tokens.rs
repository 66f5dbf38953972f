//! Mintable CEP-18 token used as the vault asset on test and dev networks
use odra::prelude::*;
use odra::casper_types::U256;
use crate::token::TokenLedger;

/// Asset token with an open faucet
#[odra::module]
pub struct AssetToken {
    ledger: SubModule<TokenLedger>,
}

#[odra::module]
impl AssetToken {
    pub fn init(&mut self, name: String, symbol: String, decimals: u8) {
        self.ledger.init(name, symbol, decimals);
    }

    pub fn name(&self) -> String { self.ledger.name() }
    pub fn symbol(&self) -> String { self.ledger.symbol() }
    pub fn decimals(&self) -> u8 { self.ledger.decimals() }
    pub fn total_supply(&self) -> U256 { self.ledger.total_supply() }
    pub fn balance_of(&self, owner: Address) -> U256 { self.ledger.balance_of(owner) }
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 { self.ledger.allowance(owner, spender) }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        self.ledger.transfer(to, amount)
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        self.ledger.approve(spender, amount)
    }

    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        self.ledger.transfer_from(from, to, amount)
    }

    /// Faucet: anyone may mint
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.ledger.mint(to, amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TokenError;
    use odra::host::{Deployer, HostEnv};

    fn setup() -> (HostEnv, AssetTokenHostRef) {
        let env = odra_test::env();
        let init_args = AssetTokenInitArgs {
            name: String::from("Test USD"),
            symbol: String::from("tUSD"),
            decimals: 6,
        };
        let token = AssetToken::deploy(&env, init_args);
        (env, token)
    }

    #[test]
    fn test_init() {
        let (_, token) = setup();
        assert_eq!(token.name(), "Test USD");
        assert_eq!(token.symbol(), "tUSD");
        assert_eq!(token.decimals(), 6);
        assert_eq!(token.total_supply(), U256::zero());
    }

    #[test]
    fn test_transfer() {
        let (env, mut token) = setup();
        let user1 = env.get_account(0);
        let user2 = env.get_account(1);

        token.mint(user1, U256::from(1000));

        env.set_caller(user1);
        token.transfer(user2, U256::from(400));

        assert_eq!(token.balance_of(user1), U256::from(600));
        assert_eq!(token.balance_of(user2), U256::from(400));
        assert!(env.emitted(&token, "Transfer"));
    }

    #[test]
    fn test_transfer_from_requires_allowance() {
        let (env, mut token) = setup();
        let owner = env.get_account(0);
        let spender = env.get_account(1);
        let recipient = env.get_account(2);

        token.mint(owner, U256::from(1000));
        env.set_caller(owner);
        token.approve(spender, U256::from(300));

        env.set_caller(spender);
        assert_eq!(
            token.try_transfer_from(owner, recipient, U256::from(301)),
            Err(TokenError::InsufficientAllowance.into())
        );

        token.transfer_from(owner, recipient, U256::from(300));
        assert_eq!(token.balance_of(recipient), U256::from(300));
        assert_eq!(token.allowance(owner, spender), U256::zero());
    }

    #[test]
    fn test_transfer_beyond_balance_fails() {
        let (env, mut token) = setup();
        let user1 = env.get_account(0);
        let user2 = env.get_account(1);

        token.mint(user1, U256::from(10));
        env.set_caller(user1);
        assert_eq!(
            token.try_transfer(user2, U256::from(11)),
            Err(TokenError::InsufficientBalance.into())
        );
    }
}

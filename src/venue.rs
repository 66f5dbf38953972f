//! Yield venues: the interface a vault deploys principal through, and a
//! custody venue used on test and dev networks.
use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::errors::VenueError;
use crate::token::Cep18TokenContractRef;

/// The two venue slots a vault can allocate to
#[odra::odra_type]
pub enum Venue {
    A,
    B,
}

impl Venue {
    /// Name used in allocation events
    pub fn name(&self) -> String {
        match self {
            Venue::A => String::from("VenueA"),
            Venue::B => String::from("VenueB"),
        }
    }
}

/// External interface of a yield venue adapter
///
/// `supply` pulls `amount` of the asset from the caller, which must have
/// approved the venue beforehand. `redeem` sends `amount` back to the caller.
#[odra::external_contract]
pub trait YieldVenue {
    fn supply(&mut self, amount: U256) -> U256;
    fn redeem(&mut self, amount: U256) -> U256;
    fn receipt_balance_of(&self, account: Address) -> U256;
}

/// Venue that holds supplied assets 1:1 against receipts
///
/// Assets transferred to it directly are never credited to anyone and stand
/// in for yield a real venue would earn.
#[odra::module]
pub struct CustodyVenue {
    /// Asset accepted by the venue
    asset: Var<Address>,
    /// Receipt balances per depositor
    receipts: Mapping<Address, U256>,
    /// Sum of outstanding receipts
    total_receipts: Var<U256>,
}

#[odra::module]
impl CustodyVenue {
    pub fn init(&mut self, asset: Address) {
        self.asset.set(asset);
        self.total_receipts.set(U256::zero());
    }

    pub fn asset(&self) -> Address {
        self.asset.get_or_revert_with(VenueError::InvalidConfiguration)
    }

    pub fn supply(&mut self, amount: U256) -> U256 {
        if amount.is_zero() {
            self.env().revert(VenueError::ZeroAmount);
        }
        let caller = self.env().caller();

        let mut token = Cep18TokenContractRef::new(self.env(), self.asset());
        token.transfer_from(caller, self.env().self_address(), amount);

        let receipts = self.receipt_balance_of(caller);
        self.receipts.set(&caller, receipts + amount);
        let total = self.total_receipts.get_or_default();
        self.total_receipts.set(total + amount);

        amount
    }

    pub fn redeem(&mut self, amount: U256) -> U256 {
        if amount.is_zero() {
            self.env().revert(VenueError::ZeroAmount);
        }
        let caller = self.env().caller();

        let receipts = self.receipt_balance_of(caller);
        if receipts < amount {
            self.env().revert(VenueError::InsufficientReceipts);
        }
        self.receipts.set(&caller, receipts - amount);
        let total = self.total_receipts.get_or_default();
        self.total_receipts.set(total - amount);

        let mut token = Cep18TokenContractRef::new(self.env(), self.asset());
        token.transfer(caller, amount);

        amount
    }

    pub fn receipt_balance_of(&self, account: Address) -> U256 {
        self.receipts.get(&account).unwrap_or_default()
    }

    pub fn total_receipts(&self) -> U256 {
        self.total_receipts.get_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{AssetToken, AssetTokenHostRef, AssetTokenInitArgs};
    use odra::host::{Deployer, HostEnv, HostRef};

    fn setup() -> (HostEnv, AssetTokenHostRef, CustodyVenueHostRef) {
        let env = odra_test::env();
        let token = AssetToken::deploy(&env, AssetTokenInitArgs {
            name: String::from("Test USD"),
            symbol: String::from("tUSD"),
            decimals: 6,
        });
        let venue = CustodyVenue::deploy(&env, CustodyVenueInitArgs { asset: token.address() });
        (env, token, venue)
    }

    #[test]
    fn test_supply_and_redeem() {
        let (env, mut token, mut venue) = setup();
        let user = env.get_account(1);
        token.mint(user, U256::from(1000));

        env.set_caller(user);
        token.approve(venue.address(), U256::from(600));
        assert_eq!(venue.supply(U256::from(600)), U256::from(600));
        assert_eq!(venue.receipt_balance_of(user), U256::from(600));
        assert_eq!(token.balance_of(venue.address()), U256::from(600));

        venue.redeem(U256::from(250));
        assert_eq!(venue.receipt_balance_of(user), U256::from(350));
        assert_eq!(venue.total_receipts(), U256::from(350));
        assert_eq!(token.balance_of(user), U256::from(650));
    }

    #[test]
    fn test_redeem_is_capped_by_receipts() {
        let (env, mut token, mut venue) = setup();
        let user = env.get_account(1);
        token.mint(user, U256::from(100));

        env.set_caller(user);
        token.approve(venue.address(), U256::from(100));
        venue.supply(U256::from(100));

        assert_eq!(venue.try_redeem(U256::from(101)), Err(VenueError::InsufficientReceipts.into()));
        assert_eq!(venue.try_supply(U256::zero()), Err(VenueError::ZeroAmount.into()));
    }

    #[test]
    fn test_venue_names() {
        assert_eq!(Venue::A.name(), "VenueA");
        assert_eq!(Venue::B.name(), "VenueB");
    }
}

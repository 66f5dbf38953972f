//! Share/asset conversion math
//!
//! | Entry point         | Direction        | Rounding |
//! |---------------------|------------------|----------|
//! | `convert_to_shares` | assets -> shares | Down     |
//! | `convert_to_assets` | shares -> assets | Down     |
//! | `preview_deposit`   | assets -> shares | Down     |
//! | `preview_mint`      | shares -> assets | Up       |
//! | `preview_withdraw`  | assets -> shares | Up       |
//! | `preview_redeem`    | shares -> assets | Down     |
//!
//! Whenever the caller fixes one side of the trade, the other side is
//! rounded in the vault's favor.
use odra::casper_types::U256;
use crate::errors::VaultError;

/// Rounding direction for integer division
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

/// Computes `x * y / denominator` with the requested rounding
pub fn mul_div(x: U256, y: U256, denominator: U256, rounding: Rounding) -> Result<U256, VaultError> {
    if denominator.is_zero() {
        return Err(VaultError::DivisionByZero);
    }
    let product = x.checked_mul(y).ok_or(VaultError::MathOverflow)?;
    let quotient = product / denominator;

    match rounding {
        Rounding::Up if !(product % denominator).is_zero() => {
            quotient.checked_add(U256::one()).ok_or(VaultError::MathOverflow)
        }
        _ => Ok(quotient),
    }
}

/// Converts assets to shares at the vault's exchange rate
///
/// An empty vault (no shares, or no accounted assets) converts 1:1.
pub fn assets_to_shares(
    assets: U256,
    total_assets: U256,
    total_shares: U256,
    rounding: Rounding,
) -> Result<U256, VaultError> {
    if total_shares.is_zero() || total_assets.is_zero() {
        return Ok(assets);
    }
    mul_div(assets, total_shares, total_assets, rounding)
}

/// Converts shares to assets at the vault's exchange rate
///
/// With no shares outstanding the rate is 1:1.
pub fn shares_to_assets(
    shares: U256,
    total_assets: U256,
    total_shares: U256,
    rounding: Rounding,
) -> Result<U256, VaultError> {
    if total_shares.is_zero() {
        return Ok(shares);
    }
    mul_div(shares, total_assets, total_shares, rounding)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(value: u64) -> U256 {
        U256::from(value)
    }

    #[test]
    fn test_bootstrap_rate_is_one_to_one() {
        assert_eq!(assets_to_shares(u(1000), u(0), u(0), Rounding::Down).ok(), Some(u(1000)));
        assert_eq!(shares_to_assets(u(1000), u(0), u(0), Rounding::Up).ok(), Some(u(1000)));
    }

    #[test]
    fn test_rounding_directions() {
        // 1000 assets backing 333 shares
        assert_eq!(assets_to_shares(u(100), u(1000), u(333), Rounding::Down).ok(), Some(u(33)));
        assert_eq!(assets_to_shares(u(100), u(1000), u(333), Rounding::Up).ok(), Some(u(34)));
        assert_eq!(shares_to_assets(u(10), u(1000), u(333), Rounding::Down).ok(), Some(u(30)));
        assert_eq!(shares_to_assets(u(10), u(1000), u(333), Rounding::Up).ok(), Some(u(31)));
    }

    #[test]
    fn test_exact_division_does_not_round_up() {
        assert_eq!(mul_div(u(500), u(2000), u(1000), Rounding::Up).ok(), Some(u(1000)));
    }

    #[test]
    fn test_mul_div_errors() {
        assert!(matches!(mul_div(u(1), u(1), U256::zero(), Rounding::Down), Err(VaultError::DivisionByZero)));
        assert!(matches!(mul_div(U256::MAX, u(2), u(1), Rounding::Down), Err(VaultError::MathOverflow)));
    }

    #[test]
    fn test_round_trips_never_favor_the_caller() {
        let states = [(u(1000), u(1000)), (u(1000), u(333)), (u(7919), u(104_729)), (u(1), u(3))];
        for (total_assets, total_shares) in states {
            for x in [1u64, 2, 3, 17, 999, 1000, 123_456] {
                let shares = assets_to_shares(u(x), total_assets, total_shares, Rounding::Down).ok().unwrap_or_default();
                let back = shares_to_assets(shares, total_assets, total_shares, Rounding::Down).ok().unwrap_or_default();
                assert!(back <= u(x));

                let assets = shares_to_assets(u(x), total_assets, total_shares, Rounding::Down).ok().unwrap_or_default();
                let back = assets_to_shares(assets, total_assets, total_shares, Rounding::Down).ok().unwrap_or_default();
                assert!(back <= u(x));
            }
        }
    }

    #[test]
    fn test_preview_mint_costs_at_least_preview_deposit_value() {
        // Paying preview_mint(s) assets must never buy fewer than s shares
        let (total_assets, total_shares) = (u(1000), u(333));
        for s in [1u64, 5, 33, 34, 100] {
            let cost = shares_to_assets(u(s), total_assets, total_shares, Rounding::Up).ok().unwrap_or_default();
            let bought = assets_to_shares(cost, total_assets, total_shares, Rounding::Down).ok().unwrap_or_default();
            assert!(bought >= u(s));
        }
    }
}

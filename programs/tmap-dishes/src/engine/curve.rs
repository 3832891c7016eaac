use anchor_lang::prelude::*;
use crate::constants::{BASE_PRICE, BPS_DENOMINATOR, SELL_VALUE_BPS, SLOPE};
use crate::errors::DishError;

/// Result of solving the curve for a committed USDC amount
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MintQuote {
    /// Maximal whole tokens the amount buys (0 when it cannot buy one)
    pub amount: u64,

    /// Exact curve cost of `amount` tokens, never above the committed amount
    pub cost: u64,
}

/// Price of the token at position `supply`
///
/// price(s) = BASE_PRICE + s * SLOPE
pub fn price(supply: u64) -> Result<u64> {
    (supply as u128)
        .checked_mul(SLOPE as u128)
        .and_then(|v| v.checked_add(BASE_PRICE as u128))
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| error!(DishError::CalculationOverflow))
}

/// Cost of minting `amount` tokens starting at `supply`
///
/// Closed form of price(supply) + ... + price(supply + amount - 1):
/// amount * BASE_PRICE + SLOPE * (amount * supply + amount * (amount - 1) / 2)
///
/// Every unit price is an exact integer, so the closed form equals the
/// per-unit sum bit for bit.
pub fn mint_cost(supply: u64, amount: u64) -> Result<u64> {
    let cost = mint_cost_wide(supply as u128, amount as u128)
        .ok_or_else(|| error!(DishError::CalculationOverflow))?;
    u64::try_from(cost).map_err(|_| error!(DishError::CalculationOverflow))
}

fn mint_cost_wide(supply: u128, amount: u128) -> Option<u128> {
    if amount == 0 {
        return Some(0);
    }
    let triangle = amount.checked_mul(amount - 1)? / 2;
    let steps = amount.checked_mul(supply)?.checked_add(triangle)?;
    amount
        .checked_mul(BASE_PRICE as u128)?
        .checked_add(steps.checked_mul(SLOPE as u128)?)
}

/// Maximal token amount whose mint cost fits in `usdc_amount`
///
/// Solves SLOPE*a^2 + (2*price(supply) - SLOPE)*a - 2*usdc <= 0 for the
/// positive root with an integer square root, then corrects the estimate
/// by whole steps so the result is exact.
pub fn tokens_for_usdc(supply: u64, usdc_amount: u64) -> Result<MintQuote> {
    let overflow = || error!(DishError::CalculationOverflow);

    if usdc_amount == 0 {
        return Ok(MintQuote::default());
    }

    let slope = SLOPE as u128;
    let linear = (price(supply)? as u128)
        .checked_mul(2)
        .and_then(|v| v.checked_sub(slope))
        .ok_or_else(overflow)?;
    let discriminant = linear
        .checked_mul(linear)
        .and_then(|sq| {
            slope
                .checked_mul(8)?
                .checked_mul(usdc_amount as u128)?
                .checked_add(sq)
        })
        .ok_or_else(overflow)?;

    let estimate = isqrt(discriminant).saturating_sub(linear) / (2 * slope);
    let mut amount = u64::try_from(estimate).map_err(|_| overflow())?;

    // Round-off in the root can leave the estimate one step either side.
    while let Some(next) = amount.checked_add(1) {
        match mint_cost_wide(supply as u128, next as u128) {
            Some(cost) if cost <= usdc_amount as u128 => amount = next,
            _ => break,
        }
    }
    while amount > 0 && mint_cost(supply, amount)? > usdc_amount {
        amount -= 1;
    }

    Ok(MintQuote {
        amount,
        cost: mint_cost(supply, amount)?,
    })
}

/// Payout for selling `amount` tokens off the top of `supply`
///
/// 70% of what minting those same positions costs, rounded down.
pub fn sell_value(supply: u64, amount: u64) -> Result<u64> {
    require!(amount <= supply, DishError::InsufficientBalance);
    let cost = mint_cost(supply - amount, amount)? as u128;
    let value = cost * SELL_VALUE_BPS as u128 / BPS_DENOMINATOR as u128;
    u64::try_from(value).map_err(|_| error!(DishError::CalculationOverflow))
}

/// Floor of the square root (Newton's method, no floating point)
fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = n / 2 + 1;
    let mut y = (x + n / x) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::error_name;

    fn brute_force_cost(supply: u64, amount: u64) -> u64 {
        (supply..supply + amount).map(|s| price(s).unwrap()).sum()
    }

    #[test]
    fn price_is_linear_and_strictly_increasing() {
        assert_eq!(price(0).unwrap(), 100_000);
        assert_eq!(price(1).unwrap(), 112_500);
        assert_eq!(price(10).unwrap(), 225_000);
        for s in 0..500 {
            assert!(price(s + 1).unwrap() > price(s).unwrap());
        }
    }

    #[test]
    fn mint_cost_matches_brute_force() {
        for supply in [0u64, 1, 2, 7, 10, 99, 250, 1_000, 12_345] {
            for amount in 0..64 {
                assert_eq!(
                    mint_cost(supply, amount).unwrap(),
                    brute_force_cost(supply, amount),
                    "supply={supply} amount={amount}"
                );
            }
        }
    }

    #[test]
    fn ten_tokens_from_zero_cost_one_and_a_half() {
        // 10 * (0.10 + 0.2125) / 2
        assert_eq!(mint_cost(0, 10).unwrap(), 1_562_500);
    }

    #[test]
    fn tokens_for_usdc_is_maximal() {
        for supply in [0u64, 1, 5, 11, 40, 333, 5_000] {
            for usdc in [1u64, 99_999, 100_000, 150_000, 1_000_000, 1_562_500, 2_000_000, 3_000_000, 6_000_000, 10_000_000] {
                let quote = tokens_for_usdc(supply, usdc).unwrap();
                assert!(quote.cost <= usdc);
                assert_eq!(quote.cost, mint_cost(supply, quote.amount).unwrap());
                assert!(
                    mint_cost(supply, quote.amount + 1).unwrap() > usdc,
                    "supply={supply} usdc={usdc} amount={}",
                    quote.amount
                );
            }
        }
    }

    #[test]
    fn tokens_for_exact_cost_hits_boundary() {
        let quote = tokens_for_usdc(0, 1_562_500).unwrap();
        assert_eq!(quote, MintQuote { amount: 10, cost: 1_562_500 });

        let short = tokens_for_usdc(0, 1_562_499).unwrap();
        assert_eq!(short.amount, 9);
    }

    #[test]
    fn amounts_below_next_price_buy_nothing() {
        assert_eq!(tokens_for_usdc(0, 0).unwrap(), MintQuote::default());
        assert_eq!(tokens_for_usdc(0, 99_999).unwrap().amount, 0);
        assert_eq!(tokens_for_usdc(20, price(20).unwrap() - 1).unwrap().amount, 0);
    }

    #[test]
    fn two_dollars_from_zero_buys_eleven() {
        let quote = tokens_for_usdc(0, 2_000_000).unwrap();
        assert_eq!(quote.amount, 11);
        assert_eq!(quote.cost, 1_787_500);
    }

    #[test]
    fn sell_value_is_seventy_percent_of_mint_cost() {
        for supply in [1u64, 10, 37, 500] {
            for amount in 1..=supply.min(20) {
                let cost = mint_cost(supply - amount, amount).unwrap();
                let value = sell_value(supply, amount).unwrap();
                assert_eq!(value, cost * 7 / 10);
                assert!(value < cost);
            }
        }
    }

    #[test]
    fn sell_more_than_supply_is_rejected() {
        let err = sell_value(3, 4).unwrap_err();
        assert_eq!(error_name(&err), "InsufficientBalance");
    }

    #[test]
    fn isqrt_is_floor() {
        for n in 0u128..2_000 {
            let r = isqrt(n);
            assert!(r * r <= n && (r + 1) * (r + 1) > n, "n={n}");
        }
        assert_eq!(isqrt(191_406_250_000), 437_500);
    }

    #[test]
    fn huge_supply_overflows_cleanly() {
        assert!(mint_cost(u64::MAX, 2).is_err());
        assert!(price(u64::MAX).is_err());
    }
}

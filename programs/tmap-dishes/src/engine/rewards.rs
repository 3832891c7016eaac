//! Lazy proportional reward distribution
//!
//! Each mint drops its reward share into a per-dish accumulator
//! (`acc_reward_per_token`, reward per token scaled by REWARD_PRECISION).
//! A holding remembers the accumulator value it last settled at; whatever
//! the accumulator gained since then, times the balance, is what the
//! holding earned. Distribution is O(1) whatever the number of holders:
//! no instruction ever iterates other holders.
//!
//! The accumulator increment is rounded up and every settlement rounded
//! down. A sole holder receives the full share exactly, and the sum of
//! all settlements stays within the distributed pool as long as
//! (distributions x supply) stays below REWARD_PRECISION. Claims are
//! additionally capped by the dish's undistributed balance.

use anchor_lang::prelude::*;
use crate::constants::{BPS_DENOMINATOR, REWARD_PRECISION, REWARD_SHARE_BPS};
use crate::errors::DishError;
use crate::state::{Dish, Holding};

/// Where a mint's reward share went
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewardRouting {
    /// Folded into the accumulator for existing holders
    Holders(u64),
    /// No holders yet: pushed straight to the protocol fee recipient
    Protocol(u64),
}

impl RewardRouting {
    /// Amount that leaves the vault for the fee recipient
    pub fn protocol_amount(&self) -> u64 {
        match self {
            RewardRouting::Protocol(amount) => *amount,
            RewardRouting::Holders(_) => 0,
        }
    }
}

/// Reward share of a mint charge (2.5%, rounded down)
pub fn reward_share(charge: u64) -> Result<u64> {
    let share = (charge as u128) * (REWARD_SHARE_BPS as u128) / (BPS_DENOMINATOR as u128);
    u64::try_from(share).map_err(|_| error!(DishError::CalculationOverflow))
}

/// Distribute `share` across the dish's current supply
///
/// Must run before the mint grows the supply, so the new tokens take no
/// part of the reward their own mint generated.
pub fn distribute(dish: &mut Dish, share: u64) -> Result<RewardRouting> {
    if dish.total_supply == 0 {
        return Ok(RewardRouting::Protocol(share));
    }
    if share == 0 {
        return Ok(RewardRouting::Holders(0));
    }

    let supply = dish.total_supply as u128;
    let increment = (share as u128)
        .checked_mul(REWARD_PRECISION)
        .and_then(|scaled| scaled.checked_add(supply - 1))
        .map(|scaled| scaled / supply)
        .ok_or(DishError::CalculationOverflow)?;
    let acc = dish
        .acc_reward_per_token
        .checked_add(increment)
        .ok_or(DishError::CalculationOverflow)?;
    let distributed = dish
        .rewards_distributed
        .checked_add(share)
        .ok_or(DishError::CalculationOverflow)?;

    dish.acc_reward_per_token = acc;
    dish.rewards_distributed = distributed;
    Ok(RewardRouting::Holders(share))
}

/// Reward earned by the holding since its last settlement (read-only)
pub fn accrued(dish: &Dish, holding: &Holding) -> Result<u64> {
    let delta = dish.acc_reward_per_token.saturating_sub(holding.reward_debt);
    let earned = (holding.balance as u128)
        .checked_mul(delta)
        .ok_or(DishError::CalculationOverflow)?
        / REWARD_PRECISION;
    u64::try_from(earned).map_err(|_| error!(DishError::CalculationOverflow))
}

/// Move accrued reward into pending and checkpoint at the current accumulator
///
/// Runs before every balance change touching the holding, always against
/// the pre-change balance. Returns the amount newly settled.
pub fn settle(dish: &Dish, holding: &mut Holding) -> Result<u64> {
    let earned = accrued(dish, holding)?;
    let pending = holding
        .pending_rewards
        .checked_add(earned)
        .ok_or(DishError::CalculationOverflow)?;

    holding.pending_rewards = pending;
    holding.reward_debt = dish.acc_reward_per_token;
    Ok(earned)
}

/// Settle and drain the holding's pending rewards; returns the payout
///
/// Zero pending is a valid no-op that returns 0.
pub fn take_pending(dish: &mut Dish, holding: &mut Holding) -> Result<u64> {
    settle(dish, holding)?;

    let unpaid = dish
        .rewards_distributed
        .saturating_sub(dish.rewards_claimed);
    let payout = holding.pending_rewards.min(unpaid);
    if payout == 0 {
        return Ok(0);
    }

    let claimed = dish
        .rewards_claimed
        .checked_add(payout)
        .ok_or(DishError::CalculationOverflow)?;
    let lifetime = holding
        .rewards_claimed
        .checked_add(payout)
        .ok_or(DishError::CalculationOverflow)?;

    holding.pending_rewards -= payout;
    holding.rewards_claimed = lifetime;
    dish.rewards_claimed = claimed;
    Ok(payout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ledger;

    fn holder() -> Holding {
        Holding {
            owner: Pubkey::new_unique(),
            ..Default::default()
        }
    }

    /// Mint `amount` tokens to `holding`, distributing `share` first
    fn mint_with_reward(dish: &mut Dish, holding: &mut Holding, amount: u64, share: u64) -> RewardRouting {
        let routing = distribute(dish, share).unwrap();
        settle(dish, holding).unwrap();
        ledger::apply_mint(dish, holding, amount).unwrap();
        routing
    }

    #[test]
    fn first_share_goes_to_protocol() {
        let mut dish = Dish::default();
        let mut a = holder();

        let routing = mint_with_reward(&mut dish, &mut a, 11, 50_000);
        assert_eq!(routing, RewardRouting::Protocol(50_000));
        assert_eq!(routing.protocol_amount(), 50_000);
        assert_eq!(dish.acc_reward_per_token, 0);
        assert_eq!(dish.rewards_distributed, 0);
        assert_eq!(accrued(&dish, &a).unwrap(), 0);
    }

    #[test]
    fn sole_holder_receives_full_share_exactly() {
        let mut dish = Dish::default();
        let mut a = holder();
        let mut b = holder();
        mint_with_reward(&mut dish, &mut a, 11, 50_000);

        let routing = mint_with_reward(&mut dish, &mut b, 10, 75_000);
        assert_eq!(routing, RewardRouting::Holders(75_000));
        assert_eq!(a.claimable_rewards(&dish).unwrap(), 75_000);
        assert_eq!(b.claimable_rewards(&dish).unwrap(), 0);
    }

    #[test]
    fn share_is_proportional_and_ignores_holder_count() {
        let mut dish = Dish::default();
        let mut a = holder();
        let mut others: Vec<Holding> = (0..9).map(|_| holder()).collect();
        let mut late = holder();

        mint_with_reward(&mut dish, &mut a, 40, 0);
        for other in others.iter_mut() {
            mint_with_reward(&mut dish, other, 40, 0);
        }
        // A holds 40 of 400
        mint_with_reward(&mut dish, &mut late, 1, 100_000);

        assert_eq!(a.claimable_rewards(&dish).unwrap(), 10_000);
        let total: u64 = others
            .iter()
            .map(|h| h.claimable_rewards(&dish).unwrap())
            .sum::<u64>()
            + a.claimable_rewards(&dish).unwrap();
        assert_eq!(total, 100_000);
    }

    #[test]
    fn minter_gets_nothing_from_own_mint_on_new_tokens() {
        let mut dish = Dish::default();
        let mut a = holder();
        let mut b = holder();
        mint_with_reward(&mut dish, &mut a, 10, 0);
        mint_with_reward(&mut dish, &mut b, 30, 40_000);

        // the whole 40_000 belongs to A; B's fresh 30 tokens earned nothing
        assert_eq!(a.claimable_rewards(&dish).unwrap(), 40_000);
        assert_eq!(b.claimable_rewards(&dish).unwrap(), 0);
        assert_eq!(b.reward_debt, dish.acc_reward_per_token);
    }

    #[test]
    fn accumulator_never_decreases() {
        let mut dish = Dish::default();
        let mut a = holder();
        let mut last = 0u128;
        for i in 0..20u64 {
            mint_with_reward(&mut dish, &mut a, 1 + i % 3, 1_000 + i * 37);
            assert!(dish.acc_reward_per_token >= last);
            last = dish.acc_reward_per_token;
        }
    }

    #[test]
    fn settlements_never_exceed_distributed_pool() {
        let mut dish = Dish::default();
        let mut holders: Vec<Holding> = (0..7).map(|_| holder()).collect();
        for round in 0..30u64 {
            let idx = (round as usize * 3) % holders.len();
            mint_with_reward(&mut dish, &mut holders[idx], 1 + round % 5, 2_500 + round * 11);
        }

        let owed: u64 = holders
            .iter()
            .map(|h| h.claimable_rewards(&dish).unwrap())
            .sum();
        assert!(owed <= dish.rewards_distributed);
    }

    #[test]
    fn take_pending_drains_and_counts() {
        let mut dish = Dish::default();
        let mut a = holder();
        let mut b = holder();
        mint_with_reward(&mut dish, &mut a, 5, 0);
        mint_with_reward(&mut dish, &mut b, 5, 25_000);

        assert_eq!(take_pending(&mut dish, &mut a).unwrap(), 25_000);
        assert_eq!(a.pending_rewards, 0);
        assert_eq!(a.rewards_claimed, 25_000);
        assert_eq!(dish.rewards_claimed, 25_000);

        // nothing left: no-op
        assert_eq!(take_pending(&mut dish, &mut a).unwrap(), 0);
        assert_eq!(take_pending(&mut dish, &mut b).unwrap(), 0);
    }

    #[test]
    fn reward_share_is_two_and_a_half_percent() {
        assert_eq!(reward_share(2_000_000).unwrap(), 50_000);
        assert_eq!(reward_share(3_000_000).unwrap(), 75_000);
        assert_eq!(reward_share(39).unwrap(), 0);
    }
}

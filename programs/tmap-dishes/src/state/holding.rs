use anchor_lang::prelude::*;
use crate::engine::{rewards, spend_cap};
use super::Dish;

/// One account's position in one dish
///
/// Seeds: ["holding", dish_id, owner]
///
/// Carries the balance, the reward checkpoint and the lifetime spend
/// record. Created on first credit and never closed: a full sell or
/// transfer zeroes the balance but keeps the spend record, which must
/// outlive the position.
#[account]
#[derive(Default, Debug)]
pub struct Holding {
    /// Wallet owning this position
    pub owner: Pubkey,

    /// Dish this position belongs to
    pub dish_id: [u8; 32],

    /// Token balance
    pub balance: u64,

    /// Accumulator value at the last settlement (scaled by REWARD_PRECISION)
    pub reward_debt: u128,

    /// Settled but unclaimed rewards
    pub pending_rewards: u64,

    /// Lifetime USDC spent minting this dish (never reset)
    pub usdc_spent: u64,

    /// Lifetime rewards paid out
    pub rewards_claimed: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Holding {
    /// 8 (discriminator) + 32 + 32 + 8 + 16 + 8 + 8 + 8 + 1 = 121 bytes
    pub const SIZE: usize = 8 + 32 + 32 + 8 + 16 + 8 + 8 + 8 + 1;

    /// A holding created by init_if_needed has no owner until its first credit
    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// Whether this position belongs to `owner` in `dish`
    pub fn belongs_to(&self, owner: &Pubkey, dish: &Dish) -> bool {
        self.owner == *owner && self.dish_id == dish.dish_id
    }

    /// Rewards claimable right now, including accrual not yet settled
    pub fn claimable_rewards(&self, dish: &Dish) -> Result<u64> {
        self.pending_rewards
            .checked_add(rewards::accrued(dish, self)?)
            .ok_or_else(|| error!(crate::errors::DishError::CalculationOverflow))
    }

    /// USDC this account may still spend minting this dish
    pub fn remaining_allowance(&self) -> u64 {
        spend_cap::remaining_allowance(self)
    }
}

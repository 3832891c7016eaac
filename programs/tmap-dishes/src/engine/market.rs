//! Market orchestration: create, mint, sell, transfer, claim
//!
//! Every operation is two-phase. `plan_*` validates and computes the full
//! post-state on copies of the accounts plus the USDC movements it needs;
//! nothing the caller holds is touched. The instruction handler performs
//! the USDC transfers and only then calls `commit`. A rejected plan or a
//! failed transfer therefore leaves every account exactly as it was.

use anchor_lang::prelude::*;
use crate::constants::MAX_METADATA_LEN;
use crate::engine::ledger::{self, Transition};
use crate::engine::referral::{self, ReferralRouting};
use crate::engine::rewards::{self, RewardRouting};
use crate::engine::{curve, spend_cap};
use crate::errors::DishError;
use crate::state::{Dish, Holding, ReferralBalance};

// ============================================================================
// CREATE
// ============================================================================

/// Initialize a dish account; a dish can only be created once
pub fn create_dish(
    dish: &mut Dish,
    dish_id: [u8; 32],
    creator: Pubkey,
    metadata: String,
    now: i64,
) -> Result<()> {
    require!(!dish.exists, DishError::DishAlreadyExists);
    require!(metadata.len() <= MAX_METADATA_LEN, DishError::MetadataTooLong);

    dish.dish_id = dish_id;
    dish.creator = creator;
    dish.metadata = metadata;
    dish.created_at = now;
    dish.exists = true;
    dish.total_supply = 0;
    dish.holder_count = 0;
    dish.acc_reward_per_token = 0;
    dish.rewards_distributed = 0;
    dish.rewards_claimed = 0;
    dish.reserve = 0;
    Ok(())
}

// ============================================================================
// MINT
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintReceipt {
    /// Tokens credited to the minter
    pub tokens: u64,
    /// USDC pulled from the minter: the exact curve cost of `tokens`
    pub charged: u64,
    /// Upper bound the minter committed; the unspent part never leaves
    /// the minter's wallet
    pub offered: u64,
    pub reward: RewardRouting,
    pub referral: ReferralRouting,
    /// Pushed from the vault to the fee recipient
    pub protocol_amount: u64,
    pub total_supply: u64,
    pub holder_count: u64,
    pub transition: Transition,
}

#[derive(Clone, Debug)]
pub struct MintPlan {
    dish: Dish,
    holding: Holding,
    referral: Option<ReferralBalance>,
    pub receipt: MintReceipt,
}

impl MintPlan {
    pub fn commit(
        self,
        dish: &mut Dish,
        holding: &mut Holding,
        referral: Option<&mut ReferralBalance>,
    ) -> MintReceipt {
        *dish = self.dish;
        *holding = self.holding;
        if let (Some(target), Some(next)) = (referral, self.referral) {
            *target = next;
        }
        self.receipt
    }
}

/// Plan a mint of as many tokens as `usdc_amount` buys
///
/// Only the curve cost of those tokens is charged; the spend cap, the fee
/// shares and the reserve are all computed from it.
///
/// Order matters: the reward share is folded into the accumulator against
/// the pre-mint supply, the minter is settled against the updated
/// accumulator, and only then does the ledger grow.
pub fn plan_mint(
    dish: &Dish,
    holding: &Holding,
    referral: Option<&ReferralBalance>,
    minter: &Pubkey,
    usdc_amount: u64,
    referrer: Option<Pubkey>,
) -> Result<MintPlan> {
    require!(dish.exists, DishError::DishDoesNotExist);

    let mut dish = dish.clone();
    let mut holding = bind_or_open(holding, minter, &dish)?;
    let mut referral = referral.cloned();

    let quote = curve::tokens_for_usdc(dish.total_supply, usdc_amount)?;
    require!(quote.amount > 0, DishError::ZeroAmount);
    let charged = quote.cost;
    spend_cap::check_and_record(&mut holding, charged)?;

    let reward_share = rewards::reward_share(charged)?;
    let referral_share = referral::referral_share(charged)?;
    let reserve_share = charged
        .checked_sub(reward_share)
        .and_then(|v| v.checked_sub(referral_share))
        .ok_or(DishError::CalculationOverflow)?;

    let reward = rewards::distribute(&mut dish, reward_share)?;
    let referrer = referral::resolve_referrer(minter, referrer);
    let referral_routing = referral::accrue(referral.as_mut(), referrer, referral_share)?;

    rewards::settle(&dish, &mut holding)?;
    let transition = ledger::apply_mint(&mut dish, &mut holding, quote.amount)?;
    dish.reserve = dish
        .reserve
        .checked_add(reserve_share)
        .ok_or(DishError::CalculationOverflow)?;

    let protocol_amount = reward
        .protocol_amount()
        .checked_add(referral_routing.protocol_amount())
        .ok_or(DishError::CalculationOverflow)?;

    let receipt = MintReceipt {
        tokens: quote.amount,
        charged,
        offered: usdc_amount,
        reward,
        referral: referral_routing,
        protocol_amount,
        total_supply: dish.total_supply,
        holder_count: dish.holder_count,
        transition,
    };
    Ok(MintPlan { dish, holding, referral, receipt })
}

// ============================================================================
// SELL
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SellReceipt {
    pub tokens: u64,
    /// USDC paid out of the vault to the seller
    pub value: u64,
    pub total_supply: u64,
    pub holder_count: u64,
    pub transition: Transition,
}

#[derive(Clone, Debug)]
pub struct SellPlan {
    dish: Dish,
    holding: Holding,
    pub receipt: SellReceipt,
}

impl SellPlan {
    pub fn commit(self, dish: &mut Dish, holding: &mut Holding) -> SellReceipt {
        *dish = self.dish;
        *holding = self.holding;
        self.receipt
    }
}

pub fn plan_sell(dish: &Dish, holding: &Holding, seller: &Pubkey, amount: u64) -> Result<SellPlan> {
    require!(dish.exists, DishError::DishDoesNotExist);
    require!(amount > 0, DishError::ZeroAmount);
    require!(holding.belongs_to(seller, dish), DishError::HoldingMismatch);
    require!(holding.balance >= amount, DishError::InsufficientBalance);

    let mut dish = dish.clone();
    let mut holding = holding.clone();

    rewards::settle(&dish, &mut holding)?;
    let value = curve::sell_value(dish.total_supply, amount)?;
    let transition = ledger::apply_sell(&mut dish, &mut holding, amount)?;
    dish.reserve = dish
        .reserve
        .checked_sub(value)
        .ok_or(DishError::CalculationOverflow)?;

    let receipt = SellReceipt {
        tokens: amount,
        value,
        total_supply: dish.total_supply,
        holder_count: dish.holder_count,
        transition,
    };
    Ok(SellPlan { dish, holding, receipt })
}

// ============================================================================
// TRANSFER
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferReceipt {
    pub tokens: u64,
    pub holder_count: u64,
    pub sender: Transition,
    pub recipient: Transition,
}

#[derive(Clone, Debug)]
pub struct TransferPlan {
    dish: Dish,
    from: Holding,
    to: Holding,
    pub receipt: TransferReceipt,
}

impl TransferPlan {
    pub fn commit(self, dish: &mut Dish, from: &mut Holding, to: &mut Holding) -> TransferReceipt {
        *dish = self.dish;
        *from = self.from;
        *to = self.to;
        self.receipt
    }
}

/// Plan a transfer; both parties settle on their pre-transfer balances
///
/// Pending rewards stay with the sender. The recipient is checkpointed at
/// the current accumulator, so inherited tokens carry no history.
pub fn plan_transfer(
    dish: &Dish,
    from: &Holding,
    to: &Holding,
    sender: &Pubkey,
    recipient: &Pubkey,
    amount: u64,
) -> Result<TransferPlan> {
    require!(dish.exists, DishError::DishDoesNotExist);
    require!(amount > 0, DishError::ZeroAmount);
    require_keys_neq!(*sender, *recipient, DishError::SelfTransfer);
    require!(from.belongs_to(sender, dish), DishError::HoldingMismatch);
    require!(from.balance >= amount, DishError::InsufficientBalance);

    let mut dish = dish.clone();
    let mut from = from.clone();
    let mut to = bind_or_open(to, recipient, &dish)?;

    rewards::settle(&dish, &mut from)?;
    rewards::settle(&dish, &mut to)?;
    let (sent, received) = ledger::apply_transfer(&mut dish, &mut from, &mut to, amount)?;

    let receipt = TransferReceipt {
        tokens: amount,
        holder_count: dish.holder_count,
        sender: sent,
        recipient: received,
    };
    Ok(TransferPlan { dish, from, to, receipt })
}

// ============================================================================
// CLAIMS
// ============================================================================

#[derive(Clone, Debug)]
pub struct RewardClaimPlan {
    dish: Dish,
    holding: Holding,
    pub amount: u64,
}

impl RewardClaimPlan {
    pub fn commit(self, dish: &mut Dish, holding: &mut Holding) -> u64 {
        *dish = self.dish;
        *holding = self.holding;
        self.amount
    }
}

/// Plan a reward claim; a zero amount means there is nothing to pay
pub fn plan_claim_rewards(dish: &Dish, holding: &Holding, owner: &Pubkey) -> Result<RewardClaimPlan> {
    require!(dish.exists, DishError::DishDoesNotExist);
    require!(holding.belongs_to(owner, dish), DishError::HoldingMismatch);

    let mut dish = dish.clone();
    let mut holding = holding.clone();
    let amount = rewards::take_pending(&mut dish, &mut holding)?;
    Ok(RewardClaimPlan { dish, holding, amount })
}

/// Running total of a multi-dish reward claim paid out in one transfer
///
/// Pairs are drained one at a time and must be written back before the
/// next is read, so a pair listed twice pays nothing the second time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchClaim {
    pub total: u64,
    /// Pairs that contributed a nonzero amount
    pub dish_count: u32,
}

impl BatchClaim {
    /// Drain one (dish, holding) pair into the batch; returns the amount taken
    ///
    /// A pair with nothing pending is left untouched and returns 0.
    pub fn claim(&mut self, dish: &mut Dish, holding: &mut Holding, owner: &Pubkey) -> Result<u64> {
        let plan = plan_claim_rewards(dish, holding, owner)?;
        if plan.amount == 0 {
            return Ok(0);
        }

        let total = self
            .total
            .checked_add(plan.amount)
            .ok_or(DishError::CalculationOverflow)?;
        let dish_count = self
            .dish_count
            .checked_add(1)
            .ok_or(DishError::CalculationOverflow)?;

        let amount = plan.commit(dish, holding);
        self.total = total;
        self.dish_count = dish_count;
        Ok(amount)
    }
}

#[derive(Clone, Debug)]
pub struct ReferralClaimPlan {
    referral: ReferralBalance,
    pub amount: u64,
}

impl ReferralClaimPlan {
    pub fn commit(self, referral: &mut ReferralBalance) -> u64 {
        *referral = self.referral;
        self.amount
    }
}

pub fn plan_claim_referral(referral: &ReferralBalance, referrer: &Pubkey) -> Result<ReferralClaimPlan> {
    require_keys_eq!(referral.authority, *referrer, DishError::InvalidReferrer);

    let mut referral = referral.clone();
    let amount = referral::claim(&mut referral)?;
    Ok(ReferralClaimPlan { referral, amount })
}

/// Copy a holding for `owner`, opening it when init_if_needed just created it
fn bind_or_open(holding: &Holding, owner: &Pubkey, dish: &Dish) -> Result<Holding> {
    let mut holding = holding.clone();
    if !holding.is_initialized() {
        holding.owner = *owner;
        holding.dish_id = dish.dish_id;
        holding.reward_debt = dish.acc_reward_per_token;
    }
    require!(holding.belongs_to(owner, dish), DishError::HoldingMismatch);
    Ok(holding)
}

use anchor_lang::prelude::*;
use crate::constants::MAX_METADATA_LEN;
use crate::engine::curve::{self, MintQuote};

/// One dish's market: supply, holders, and its reward accumulator
///
/// Seeds: ["dish", dish_id]
///
/// The dish is the unit of serialization. Every instruction that changes a
/// dish's supply, rewards or holders takes this account writable, so the
/// runtime orders all of them while other dishes trade in parallel.
#[account]
#[derive(Default, Debug)]
pub struct Dish {
    /// Opaque 32-byte id (hash of restaurant id and dish name)
    pub dish_id: [u8; 32],

    /// Wallet that created the dish (immutable)
    pub creator: Pubkey,

    /// Free-form metadata, bounded by MAX_METADATA_LEN (immutable)
    pub metadata: String,

    /// Creation timestamp (immutable)
    pub created_at: i64,

    /// Set once by create_dish, never cleared
    pub exists: bool,

    /// Sum of all holding balances
    pub total_supply: u64,

    /// Number of holdings with a nonzero balance
    pub holder_count: u64,

    /// Cumulative reward per token, scaled by REWARD_PRECISION
    /// Monotonically non-decreasing
    pub acc_reward_per_token: u128,

    /// Lifetime USDC distributed to holders through the accumulator
    pub rewards_distributed: u64,

    /// Lifetime USDC paid out to holders on claim
    pub rewards_claimed: u64,

    /// USDC held in the vault to back sell payouts
    pub reserve: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Dish {
    /// 8 (discriminator) + 32 (dish_id) + 32 (creator) + (4 + 200) (metadata)
    /// + 8 (created_at) + 1 (exists) + 8 (total_supply) + 8 (holder_count)
    /// + 16 (acc_reward_per_token) + 8 + 8 + 8 (counters) + 1 (bump) = 342 bytes
    pub const SIZE: usize = 8 + 32 + 32 + (4 + MAX_METADATA_LEN) + 8 + 1 + 8 + 8 + 16 + 8 + 8 + 8 + 1;

    /// Price of the next token
    pub fn current_price(&self) -> Result<u64> {
        curve::price(self.total_supply)
    }

    /// Cost of minting `amount` tokens at the current supply
    pub fn mint_cost(&self, amount: u64) -> Result<u64> {
        curve::mint_cost(self.total_supply, amount)
    }

    /// Tokens a committed USDC amount buys at the current supply
    pub fn tokens_for_usdc(&self, usdc_amount: u64) -> Result<MintQuote> {
        curve::tokens_for_usdc(self.total_supply, usdc_amount)
    }

    /// Payout for selling `amount` tokens at the current supply
    pub fn sell_value(&self, amount: u64) -> Result<u64> {
        curve::sell_value(self.total_supply, amount)
    }
}

/// Derive the canonical dish id from a restaurant id and a dish name
///
/// The dish name is trimmed before hashing so that "Pad Thai " and
/// "Pad Thai" resolve to the same dish.
pub fn dish_id(restaurant_id: &str, dish_name: &str) -> [u8; 32] {
    solana_program::hash::hashv(&[
        restaurant_id.as_bytes(),
        b":",
        dish_name.trim().as_bytes(),
    ])
    .to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dish_id_trims_the_name() {
        assert_eq!(dish_id("rest-1", "  Pad Thai "), dish_id("rest-1", "Pad Thai"));
    }

    #[test]
    fn dish_id_separates_restaurants() {
        assert_ne!(dish_id("rest-1", "Pad Thai"), dish_id("rest-2", "Pad Thai"));
    }

    #[test]
    fn dish_id_matches_joined_hash() {
        let expected = solana_program::hash::hash(b"rest-1:Pad Thai").to_bytes();
        assert_eq!(dish_id("rest-1", "Pad Thai"), expected);
    }

    #[test]
    fn fresh_dish_quotes_base_price() {
        let dish = Dish::default();
        assert_eq!(dish.current_price().unwrap(), 100_000);
        assert_eq!(dish.tokens_for_usdc(1_562_500).unwrap().amount, 10);
    }

    #[test]
    fn size_covers_a_full_length_dish() {
        let dish = Dish {
            metadata: "m".repeat(MAX_METADATA_LEN),
            ..Default::default()
        };
        let mut data = Vec::new();
        dish.try_serialize(&mut data).unwrap();
        assert_eq!(Dish::SIZE, 342);
        assert_eq!(data.len(), Dish::SIZE);
    }
}

use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod errors;
pub mod instructions;
pub mod state;
pub mod utils;

use engine::curve::MintQuote;
use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod tmap_dishes {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize(ctx)
    }

    pub fn set_fee_recipient(ctx: Context<SetFeeRecipient>, new_fee_recipient: Pubkey) -> Result<()> {
        instructions::set_fee_recipient(ctx, new_fee_recipient)
    }

    pub fn register_referrer(ctx: Context<RegisterReferrer>) -> Result<()> {
        instructions::register_referrer(ctx)
    }

    pub fn create_dish(ctx: Context<CreateDish>, dish_id: [u8; 32], metadata: String) -> Result<()> {
        instructions::create_dish(ctx, dish_id, metadata)
    }

    pub fn mint(ctx: Context<MintDish>, usdc_amount: u64, referrer: Option<Pubkey>) -> Result<()> {
        instructions::mint_dish(ctx, usdc_amount, referrer)
    }

    pub fn sell(ctx: Context<SellDish>, amount: u64) -> Result<()> {
        instructions::sell_dish(ctx, amount)
    }

    pub fn transfer(ctx: Context<TransferDish>, amount: u64) -> Result<()> {
        instructions::transfer_dish(ctx, amount)
    }

    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::claim_rewards(ctx)
    }

    /// Pass (dish, holding) pairs in remaining_accounts
    pub fn claim_all_rewards<'info>(
        ctx: Context<'_, '_, 'info, 'info, ClaimAllRewards<'info>>,
    ) -> Result<()> {
        instructions::claim_all_rewards(ctx)
    }

    pub fn claim_referral(ctx: Context<ClaimReferral>) -> Result<()> {
        instructions::claim_referral(ctx)
    }

    pub fn quote_mint(ctx: Context<Quote>, usdc_amount: u64) -> Result<MintQuote> {
        instructions::quote_mint(ctx, usdc_amount)
    }

    pub fn quote_sell(ctx: Context<Quote>, amount: u64) -> Result<u64> {
        instructions::quote_sell(ctx, amount)
    }
}

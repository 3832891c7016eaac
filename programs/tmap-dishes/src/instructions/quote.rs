use anchor_lang::prelude::*;
use crate::constants::DISH;
use crate::engine::curve::MintQuote;
use crate::errors::DishError;
use crate::state::Dish;

/// Tokens `usdc_amount` would buy right now, and what they cost on the curve
///
/// Read-only; clients fetch the result through simulation.
pub fn quote_mint(ctx: Context<Quote>, usdc_amount: u64) -> Result<MintQuote> {
    ctx.accounts.dish.tokens_for_usdc(usdc_amount)
}

/// USDC a sell of `amount` tokens would pay right now
pub fn quote_sell(ctx: Context<Quote>, amount: u64) -> Result<u64> {
    ctx.accounts.dish.sell_value(amount)
}

#[derive(Accounts)]
pub struct Quote<'info> {
    #[account(
        seeds = [DISH, dish.dish_id.as_ref()],
        bump = dish.bump,
        constraint = dish.exists @ DishError::DishDoesNotExist,
    )]
    pub dish: Box<Account<'info, Dish>>,
}

use anchor_lang::prelude::*;
use crate::constants::DISH;
use crate::engine::market;
use crate::state::Dish;

/// Create the market for one dish
///
/// `dish_id` is the hash of restaurant id and trimmed dish name (see
/// `state::dish_id`). The account is opened with init_if_needed so that a
/// second creation reaches the engine and fails with DishAlreadyExists
/// instead of a bare allocation error.
pub fn create_dish(ctx: Context<CreateDish>, dish_id: [u8; 32], metadata: String) -> Result<()> {
    let clock = Clock::get()?;
    let creator = ctx.accounts.creator.key();
    let dish = &mut ctx.accounts.dish;

    market::create_dish(dish, dish_id, creator, metadata, clock.unix_timestamp)?;
    dish.bump = ctx.bumps.dish;

    emit!(DishCreatedEvent {
        dish_id,
        creator,
        metadata: dish.metadata.clone(),
        timestamp: clock.unix_timestamp,
    });

    msg!("Dish created by {}", creator);

    Ok(())
}

#[derive(Accounts)]
#[instruction(dish_id: [u8; 32])]
pub struct CreateDish<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        init_if_needed,
        payer = creator,
        space = Dish::SIZE,
        seeds = [DISH, dish_id.as_ref()],
        bump
    )]
    pub dish: Box<Account<'info, Dish>>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct DishCreatedEvent {
    pub dish_id: [u8; 32],
    pub creator: Pubkey,
    pub metadata: String,
    pub timestamp: i64,
}

use anchor_lang::prelude::*;
use crate::constants::{DISH, HOLDING};
use crate::engine::market;
use crate::errors::DishError;
use crate::state::{Dish, Holding};

/// Move tokens between two accounts of the same dish
///
/// No USDC moves. The sender pays rent for the recipient's holding when it
/// does not exist yet. Neither party's spend record changes.
pub fn transfer_dish(ctx: Context<TransferDish>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let sender = ctx.accounts.sender.key();
    let recipient = ctx.accounts.recipient.key();

    let plan = market::plan_transfer(
        &ctx.accounts.dish,
        &ctx.accounts.from_holding,
        &ctx.accounts.to_holding,
        &sender,
        &recipient,
        amount,
    )?;

    let receipt = plan.commit(
        &mut ctx.accounts.dish,
        &mut ctx.accounts.from_holding,
        &mut ctx.accounts.to_holding,
    );
    ctx.accounts.to_holding.bump = ctx.bumps.to_holding;

    emit!(DishTransferredEvent {
        dish_id: ctx.accounts.dish.dish_id,
        from: sender,
        to: recipient,
        tokens: receipt.tokens,
        holder_count: receipt.holder_count,
        timestamp: clock.unix_timestamp,
    });

    msg!("Transferred {} tokens from {} to {}", receipt.tokens, sender, recipient);

    Ok(())
}

#[derive(Accounts)]
pub struct TransferDish<'info> {
    #[account(mut)]
    pub sender: Signer<'info>,

    /// CHECK: any wallet may receive tokens; only its key is used
    #[account(constraint = recipient.key() != sender.key() @ DishError::SelfTransfer)]
    pub recipient: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [DISH, dish.dish_id.as_ref()],
        bump = dish.bump,
        constraint = dish.exists @ DishError::DishDoesNotExist,
    )]
    pub dish: Box<Account<'info, Dish>>,

    #[account(
        mut,
        seeds = [HOLDING, dish.dish_id.as_ref(), sender.key().as_ref()],
        bump = from_holding.bump,
    )]
    pub from_holding: Box<Account<'info, Holding>>,

    #[account(
        init_if_needed,
        payer = sender,
        space = Holding::SIZE,
        seeds = [HOLDING, dish.dish_id.as_ref(), recipient.key().as_ref()],
        bump
    )]
    pub to_holding: Box<Account<'info, Holding>>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct DishTransferredEvent {
    pub dish_id: [u8; 32],
    pub from: Pubkey,
    pub to: Pubkey,
    pub tokens: u64,
    pub holder_count: u64,
    pub timestamp: i64,
}

use anchor_lang::prelude::*;
use crate::constants::CONFIG;
use crate::errors::DishError;
use crate::state::Config;

/// Point protocol pushes at a new wallet. Owner only.
pub fn set_fee_recipient(ctx: Context<SetFeeRecipient>, new_fee_recipient: Pubkey) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let previous = config.fee_recipient;
    config.fee_recipient = new_fee_recipient;

    emit!(FeeRecipientUpdatedEvent {
        previous,
        fee_recipient: new_fee_recipient,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetFeeRecipient<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG],
        bump = config.bump,
        has_one = owner @ DishError::Unauthorized,
    )]
    pub config: Account<'info, Config>,
}

#[event]
pub struct FeeRecipientUpdatedEvent {
    pub previous: Pubkey,
    pub fee_recipient: Pubkey,
    pub timestamp: i64,
}

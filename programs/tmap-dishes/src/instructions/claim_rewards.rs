use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use anchor_spl::associated_token::AssociatedToken;
use crate::constants::{CONFIG, DISH, HOLDING, VAULT, VAULT_AUTH};
use crate::engine::market;
use crate::errors::DishError;
use crate::state::{Config, Dish, Holding};
use crate::utils::pay_from_vault;

/// Claim the caller's accrued rewards in one dish
///
/// Settles first, then pays the whole pending amount. Claiming with
/// nothing accrued succeeds and pays nothing.
pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
    let clock = Clock::get()?;
    let holder = ctx.accounts.holder.key();

    let plan = market::plan_claim_rewards(&ctx.accounts.dish, &ctx.accounts.holding, &holder)?;

    pay_from_vault(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.holder_usdc.to_account_info(),
        ctx.accounts.usdc_mint.to_account_info(),
        ctx.accounts.vault_authority.to_account_info(),
        ctx.accounts.config.vault_authority_bump,
        plan.amount,
        ctx.accounts.usdc_mint.decimals,
    )?;

    let amount = plan.commit(&mut ctx.accounts.dish, &mut ctx.accounts.holding);

    if amount > 0 {
        emit!(RewardsClaimedEvent {
            holder,
            dish_count: 1,
            amount,
            timestamp: clock.unix_timestamp,
        });
        msg!("Claimed {} USDC units of rewards", amount);
    }

    Ok(())
}

#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        seeds = [CONFIG],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [DISH, dish.dish_id.as_ref()],
        bump = dish.bump,
        constraint = dish.exists @ DishError::DishDoesNotExist,
    )]
    pub dish: Box<Account<'info, Dish>>,

    #[account(
        mut,
        seeds = [HOLDING, dish.dish_id.as_ref(), holder.key().as_ref()],
        bump = holding.bump,
    )]
    pub holding: Box<Account<'info, Holding>>,

    #[account(address = config.usdc_mint @ DishError::InvalidMint)]
    pub usdc_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init_if_needed,
        payer = holder,
        associated_token::mint = usdc_mint,
        associated_token::authority = holder,
        associated_token::token_program = token_program,
    )]
    pub holder_usdc: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [VAULT],
        bump = config.vault_bump,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: PDA used only as signing authority for the vault
    #[account(
        seeds = [VAULT_AUTH],
        bump = config.vault_authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Shared by claim_rewards and claim_all_rewards
#[event]
pub struct RewardsClaimedEvent {
    pub holder: Pubkey,
    pub dish_count: u32,
    pub amount: u64,
    pub timestamp: i64,
}

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use anchor_spl::associated_token::AssociatedToken;
use crate::constants::{CONFIG, REFERRAL, VAULT, VAULT_AUTH};
use crate::engine::market;
use crate::errors::DishError;
use crate::state::{Config, ReferralBalance};
use crate::utils::pay_from_vault;

/// Pay out the referrer's pending referral balance
///
/// Succeeds with no payout when nothing is pending.
pub fn claim_referral(ctx: Context<ClaimReferral>) -> Result<()> {
    let clock = Clock::get()?;
    let referrer = ctx.accounts.referrer.key();

    let plan = market::plan_claim_referral(&ctx.accounts.referral, &referrer)?;

    pay_from_vault(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.referrer_usdc.to_account_info(),
        ctx.accounts.usdc_mint.to_account_info(),
        ctx.accounts.vault_authority.to_account_info(),
        ctx.accounts.config.vault_authority_bump,
        plan.amount,
        ctx.accounts.usdc_mint.decimals,
    )?;

    let amount = plan.commit(&mut ctx.accounts.referral);

    if amount > 0 {
        emit!(ReferralClaimedEvent {
            referrer,
            amount,
            total_claimed: ctx.accounts.referral.claimed,
            timestamp: clock.unix_timestamp,
        });
        msg!("Referrer {} claimed {} USDC units", referrer, amount);
    }

    Ok(())
}

#[derive(Accounts)]
pub struct ClaimReferral<'info> {
    #[account(mut)]
    pub referrer: Signer<'info>,

    #[account(
        seeds = [CONFIG],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [REFERRAL, referrer.key().as_ref()],
        bump = referral.bump,
        constraint = referral.authority == referrer.key() @ DishError::InvalidReferrer,
    )]
    pub referral: Box<Account<'info, ReferralBalance>>,

    #[account(address = config.usdc_mint @ DishError::InvalidMint)]
    pub usdc_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init_if_needed,
        payer = referrer,
        associated_token::mint = usdc_mint,
        associated_token::authority = referrer,
        associated_token::token_program = token_program,
    )]
    pub referrer_usdc: InterfaceAccount<'info, TokenAccount>,

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

#[event]
pub struct ReferralClaimedEvent {
    pub referrer: Pubkey,
    pub amount: u64,
    pub total_claimed: u64,
    pub timestamp: i64,
}

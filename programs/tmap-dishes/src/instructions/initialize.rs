use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::{CONFIG, USDC_DECIMALS, VAULT, VAULT_AUTH};
use crate::errors::DishError;
use crate::state::Config;

/// Create the market configuration and the shared USDC vault
///
/// The signer becomes the owner and the initial fee recipient. The vault
/// holds every dish's curve reserve, unclaimed holder rewards and unclaimed
/// referral fees; only the vault authority PDA can move funds out of it.
pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.config;
    let owner = ctx.accounts.owner.key();

    config.owner = owner;
    config.fee_recipient = owner;
    config.usdc_mint = ctx.accounts.usdc_mint.key();
    config.vault_bump = ctx.bumps.vault;
    config.vault_authority_bump = ctx.bumps.vault_authority;
    config.bump = ctx.bumps.config;

    emit!(MarketInitializedEvent {
        owner,
        usdc_mint: config.usdc_mint,
        vault: ctx.accounts.vault.key(),
        timestamp: clock.unix_timestamp,
    });

    msg!("Market initialized, owner {}", owner);

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = Config::SIZE,
        seeds = [CONFIG],
        bump
    )]
    pub config: Account<'info, Config>,

    /// USDC mint accepted by the market
    #[account(
        constraint = usdc_mint.decimals == USDC_DECIMALS @ DishError::InvalidMint
    )]
    pub usdc_mint: InterfaceAccount<'info, Mint>,

    /// Shared USDC vault (PDA-controlled)
    /// Seeds: ["vault"]
    #[account(
        init,
        payer = owner,
        token::mint = usdc_mint,
        token::authority = vault_authority,
        seeds = [VAULT],
        bump
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Vault authority PDA (signs every payout)
    /// CHECK: This is a PDA used only as signing authority for the vault
    #[account(
        seeds = [VAULT_AUTH],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct MarketInitializedEvent {
    pub owner: Pubkey,
    pub usdc_mint: Pubkey,
    pub vault: Pubkey,
    pub timestamp: i64,
}

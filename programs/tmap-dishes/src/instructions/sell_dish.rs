use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use anchor_spl::associated_token::AssociatedToken;
use crate::constants::{CONFIG, DISH, HOLDING, VAULT, VAULT_AUTH};
use crate::engine::market;
use crate::errors::DishError;
use crate::state::{Config, Dish, Holding};
use crate::utils::pay_from_vault;

/// Sell tokens back to the curve for 70% of their curve cost
///
/// The seller's rewards are settled on the pre-sell balance, so a full
/// exit keeps everything earned so far claimable. The spend record is
/// untouched: selling never restores mint allowance.
pub fn sell_dish(ctx: Context<SellDish>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let seller = ctx.accounts.seller.key();

    let plan = market::plan_sell(&ctx.accounts.dish, &ctx.accounts.holding, &seller, amount)?;

    pay_from_vault(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.seller_usdc.to_account_info(),
        ctx.accounts.usdc_mint.to_account_info(),
        ctx.accounts.vault_authority.to_account_info(),
        ctx.accounts.config.vault_authority_bump,
        plan.receipt.value,
        ctx.accounts.usdc_mint.decimals,
    )?;

    let receipt = plan.commit(&mut ctx.accounts.dish, &mut ctx.accounts.holding);

    emit!(DishSoldEvent {
        dish_id: ctx.accounts.dish.dish_id,
        seller,
        tokens: receipt.tokens,
        value: receipt.value,
        total_supply: receipt.total_supply,
        holder_count: receipt.holder_count,
        timestamp: clock.unix_timestamp,
    });

    msg!("Sold {} tokens for {} USDC units", receipt.tokens, receipt.value);

    Ok(())
}

#[derive(Accounts)]
pub struct SellDish<'info> {
    #[account(mut)]
    pub seller: Signer<'info>,

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
        seeds = [HOLDING, dish.dish_id.as_ref(), seller.key().as_ref()],
        bump = holding.bump,
    )]
    pub holding: Box<Account<'info, Holding>>,

    #[account(address = config.usdc_mint @ DishError::InvalidMint)]
    pub usdc_mint: InterfaceAccount<'info, Mint>,

    /// Created on demand; a seller who only ever received tokens by
    /// transfer may not have one yet
    #[account(
        init_if_needed,
        payer = seller,
        associated_token::mint = usdc_mint,
        associated_token::authority = seller,
        associated_token::token_program = token_program,
    )]
    pub seller_usdc: InterfaceAccount<'info, TokenAccount>,

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
pub struct DishSoldEvent {
    pub dish_id: [u8; 32],
    pub seller: Pubkey,
    pub tokens: u64,
    pub value: u64,
    pub total_supply: u64,
    pub holder_count: u64,
    pub timestamp: i64,
}

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use anchor_spl::associated_token::AssociatedToken;
use crate::constants::{CONFIG, DISH, HOLDING, REFERRAL, VAULT, VAULT_AUTH};
use crate::engine::market;
use crate::engine::referral::ReferralRouting;
use crate::engine::rewards::RewardRouting;
use crate::errors::DishError;
use crate::state::{Config, Dish, Holding, ReferralBalance};
use crate::utils::{pay_from_vault, pull_usdc};

/// Mint as many dish tokens as `usdc_amount` buys on the curve
///
/// Sequence (nothing is written before the USDC has moved):
/// 1. Plan: price the mint, check the spend cap, split the curve cost into
///    the reward share, the referral share and the curve reserve
/// 2. Pull the curve cost (not the whole offer) from the minter into the vault
/// 3. Push whatever has no holder/referrer to the protocol fee recipient
/// 4. Commit the planned dish, holding and referral state
///
/// `referrer` may be None; the minter's own key counts as None.
pub fn mint_dish(ctx: Context<MintDish>, usdc_amount: u64, referrer: Option<Pubkey>) -> Result<()> {
    let clock = Clock::get()?;
    let minter = ctx.accounts.minter.key();

    // ========== Plan ==========
    let plan = market::plan_mint(
        &ctx.accounts.dish,
        &ctx.accounts.holding,
        ctx.accounts.referral.as_deref(),
        &minter,
        usdc_amount,
        referrer,
    )?;

    require!(
        ctx.accounts.minter_usdc.amount >= plan.receipt.charged,
        DishError::InsufficientBalance
    );

    // ========== Move USDC ==========
    let decimals = ctx.accounts.usdc_mint.decimals;
    pull_usdc(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.minter_usdc.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.usdc_mint.to_account_info(),
        ctx.accounts.minter.to_account_info(),
        plan.receipt.charged,
        decimals,
    )?;
    pay_from_vault(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.fee_recipient_usdc.to_account_info(),
        ctx.accounts.usdc_mint.to_account_info(),
        ctx.accounts.vault_authority.to_account_info(),
        ctx.accounts.config.vault_authority_bump,
        plan.receipt.protocol_amount,
        decimals,
    )?;

    // ========== Commit ==========
    let receipt = plan.commit(
        &mut ctx.accounts.dish,
        &mut ctx.accounts.holding,
        ctx.accounts.referral.as_deref_mut(),
    );
    ctx.accounts.holding.bump = ctx.bumps.holding;

    let (referrer, referral_amount) = match receipt.referral {
        ReferralRouting::Referrer(key, amount) => (Some(key), amount),
        ReferralRouting::Protocol(_) => (None, 0),
    };
    let reward_to_holders = match receipt.reward {
        RewardRouting::Holders(amount) => amount,
        RewardRouting::Protocol(_) => 0,
    };

    emit!(DishMintedEvent {
        dish_id: ctx.accounts.dish.dish_id,
        minter,
        tokens: receipt.tokens,
        charged: receipt.charged,
        offered: receipt.offered,
        reward_to_holders,
        referrer,
        referral_amount,
        protocol_amount: receipt.protocol_amount,
        total_supply: receipt.total_supply,
        holder_count: receipt.holder_count,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Minted {} tokens for {} USDC units, supply now {}",
        receipt.tokens,
        receipt.charged,
        receipt.total_supply
    );

    Ok(())
}

#[derive(Accounts)]
pub struct MintDish<'info> {
    #[account(mut)]
    pub minter: Signer<'info>,

    #[account(
        seeds = [CONFIG],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    // ========== Market State ==========

    #[account(
        mut,
        seeds = [DISH, dish.dish_id.as_ref()],
        bump = dish.bump,
        constraint = dish.exists @ DishError::DishDoesNotExist,
    )]
    pub dish: Box<Account<'info, Dish>>,

    /// Minter's position, opened on first mint
    #[account(
        init_if_needed,
        payer = minter,
        space = Holding::SIZE,
        seeds = [HOLDING, dish.dish_id.as_ref(), minter.key().as_ref()],
        bump
    )]
    pub holding: Box<Account<'info, Holding>>,

    /// Referrer's escrow; required when a third-party referrer is named
    #[account(
        mut,
        seeds = [REFERRAL, referral.authority.as_ref()],
        bump = referral.bump,
    )]
    pub referral: Option<Account<'info, ReferralBalance>>,

    // ========== Token Accounts ==========

    #[account(address = config.usdc_mint @ DishError::InvalidMint)]
    pub usdc_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = usdc_mint,
        associated_token::authority = minter,
    )]
    pub minter_usdc: InterfaceAccount<'info, TokenAccount>,

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

    /// Receives reward shares of first mints and unreferred referral shares
    #[account(
        mut,
        token::mint = usdc_mint,
        token::authority = config.fee_recipient,
    )]
    pub fee_recipient_usdc: InterfaceAccount<'info, TokenAccount>,

    // ========== Programs ==========

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct DishMintedEvent {
    pub dish_id: [u8; 32],
    pub minter: Pubkey,
    pub tokens: u64,
    pub charged: u64,
    pub offered: u64,
    pub reward_to_holders: u64,
    pub referrer: Option<Pubkey>,
    pub referral_amount: u64,
    pub protocol_amount: u64,
    pub total_supply: u64,
    pub holder_count: u64,
    pub timestamp: i64,
}

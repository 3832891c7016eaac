use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use anchor_spl::associated_token::AssociatedToken;
use crate::constants::{CONFIG, VAULT, VAULT_AUTH};
use crate::engine::market::BatchClaim;
use crate::errors::DishError;
use crate::state::{Config, Dish, Holding};
use crate::utils::pay_from_vault;
use super::RewardsClaimedEvent;

/// Claim rewards across many dishes with a single payout
///
/// remaining_accounts:
/// - [dish_0, holding_0, dish_1, holding_1, ...]
/// - every account writable and owned by this program
/// - each holding must belong to the signer in the paired dish
///
/// Each pair is settled and written back in order; the summed amount is
/// paid out once at the end. Pairs with nothing accrued are left as-is.
pub fn claim_all_rewards<'info>(
    ctx: Context<'_, '_, 'info, 'info, ClaimAllRewards<'info>>,
) -> Result<()> {
    let clock = Clock::get()?;
    let holder = ctx.accounts.holder.key();

    require!(
        ctx.remaining_accounts.len() % 2 == 0,
        DishError::HoldingMismatch
    );

    let mut batch = BatchClaim::default();
    for pair in ctx.remaining_accounts.chunks_exact(2) {
        claim_pair(&mut batch, &pair[0], &pair[1], &holder)?;
    }

    pay_from_vault(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.holder_usdc.to_account_info(),
        ctx.accounts.usdc_mint.to_account_info(),
        ctx.accounts.vault_authority.to_account_info(),
        ctx.accounts.config.vault_authority_bump,
        batch.total,
        ctx.accounts.usdc_mint.decimals,
    )?;

    if batch.total > 0 {
        emit!(RewardsClaimedEvent {
            holder,
            dish_count: batch.dish_count,
            amount: batch.total,
            timestamp: clock.unix_timestamp,
        });
    }

    msg!("Claimed {} USDC units from {} dishes", batch.total, batch.dish_count);

    Ok(())
}

fn claim_pair<'a>(
    batch: &mut BatchClaim,
    dish_info: &AccountInfo<'a>,
    holding_info: &AccountInfo<'a>,
    holder: &Pubkey,
) -> Result<()> {
    for info in [dish_info, holding_info] {
        require!(info.is_writable, DishError::HoldingMismatch);
        require_keys_eq!(*info.owner, crate::ID, DishError::HoldingMismatch);
    }

    let mut dish_data = dish_info.try_borrow_mut_data()?;
    let mut holding_data = holding_info.try_borrow_mut_data()?;
    let mut dish = Dish::try_deserialize(&mut &dish_data[..])?;
    let mut holding = Holding::try_deserialize(&mut &holding_data[..])?;

    if batch.claim(&mut dish, &mut holding, holder)? > 0 {
        dish.try_serialize(&mut *dish_data)?;
        holding.try_serialize(&mut *holding_data)?;
    }

    Ok(())
}

#[derive(Accounts)]
pub struct ClaimAllRewards<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        seeds = [CONFIG],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

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

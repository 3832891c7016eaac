use anchor_lang::prelude::*;
use crate::constants::REFERRAL;
use crate::state::ReferralBalance;

/// Open the referral escrow a referrer's fees accrue into
///
/// Mints can only name a referrer that has registered; the referrer pays
/// the rent for their own escrow.
pub fn register_referrer(ctx: Context<RegisterReferrer>) -> Result<()> {
    let clock = Clock::get()?;
    let referral = &mut ctx.accounts.referral;

    referral.authority = ctx.accounts.referrer.key();
    referral.pending = 0;
    referral.claimed = 0;
    referral.referred_mints = 0;
    referral.created_at = clock.unix_timestamp;
    referral.bump = ctx.bumps.referral;

    emit!(ReferrerRegisteredEvent {
        referrer: referral.authority,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RegisterReferrer<'info> {
    #[account(mut)]
    pub referrer: Signer<'info>,

    #[account(
        init,
        payer = referrer,
        space = ReferralBalance::SIZE,
        seeds = [REFERRAL, referrer.key().as_ref()],
        bump
    )]
    pub referral: Account<'info, ReferralBalance>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct ReferrerRegisteredEvent {
    pub referrer: Pubkey,
    pub timestamp: i64,
}

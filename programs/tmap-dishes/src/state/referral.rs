use anchor_lang::prelude::*;

/// Pull-based referral escrow for one referrer
///
/// Seeds: ["referral", authority]
#[account]
#[derive(Default, Debug)]
pub struct ReferralBalance {
    /// The referrer who owns this balance
    pub authority: Pubkey,

    /// USDC owed to the referrer, paid on claim
    pub pending: u64,

    /// USDC already paid out over the account's lifetime
    pub claimed: u64,

    /// Number of mints that credited this referrer
    pub referred_mints: u64,

    /// Timestamp of registration
    pub created_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl ReferralBalance {
    /// 8 (discriminator) + 32 + 8 + 8 + 8 + 8 + 1 = 73 bytes
    pub const SIZE: usize = 8 + 32 + 8 + 8 + 8 + 8 + 1;
}

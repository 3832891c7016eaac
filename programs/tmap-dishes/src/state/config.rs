use anchor_lang::prelude::*;

/// Market-wide configuration PDA
///
/// Seeds: ["config"]
///
/// Read by every instruction that moves USDC, written only by `initialize`
/// and the owner-guarded `set_fee_recipient`. Dish-level instructions never
/// take it writable, so mints on different dishes do not contend on it.
#[account]
#[derive(Default, Debug)]
pub struct Config {
    /// The only key allowed to change the fee recipient
    pub owner: Pubkey,

    /// Wallet receiving protocol pushes (unrouted rewards and referral shares)
    pub fee_recipient: Pubkey,

    /// USDC mint accepted by the market
    pub usdc_mint: Pubkey,

    /// Vault token account bump
    pub vault_bump: u8,

    /// Vault authority PDA bump (signs every payout)
    pub vault_authority_bump: u8,

    /// PDA bump seed
    pub bump: u8,
}

impl Config {
    /// 8 (discriminator) + 32 + 32 + 32 + 1 + 1 + 1 = 107 bytes
    pub const SIZE: usize = 8 + 32 + 32 + 32 + 1 + 1 + 1;
}

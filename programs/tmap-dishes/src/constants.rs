// ============================================================================
// PDA SEEDS
// ============================================================================

pub const CONFIG: &[u8] = b"config";
pub const VAULT: &[u8] = b"vault";
pub const VAULT_AUTH: &[u8] = b"vault_auth";
pub const DISH: &[u8] = b"dish";
pub const HOLDING: &[u8] = b"holding";
pub const REFERRAL: &[u8] = b"referral";

// ============================================================================
// CURRENCY
// ============================================================================

/// USDC decimals (6-decimal fixed point)
pub const USDC_DECIMALS: u8 = 6;

/// One whole USDC in raw token units
pub const ONE_USDC: u64 = 1_000_000;

// ============================================================================
// BONDING CURVE
// ============================================================================

/// Price of the first token of every dish ($0.10)
pub const BASE_PRICE: u64 = 100_000;

/// Price increase per token already in supply ($0.0125)
pub const SLOPE: u64 = 12_500;

/// Basis point denominator
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Share of the curve cost paid back on sell (70%)
pub const SELL_VALUE_BPS: u64 = 7_000;

// ============================================================================
// FEES & LIMITS
// ============================================================================

/// Share of every mint charge distributed to existing holders (2.5%)
pub const REWARD_SHARE_BPS: u64 = 250;

/// Share of every mint charge owed to the minter's referrer (2.5%)
pub const REFERRAL_SHARE_BPS: u64 = 250;

/// Lifetime USDC one account may spend on one dish ($10.00)
pub const MAX_SPEND: u64 = 10 * ONE_USDC;

/// Fixed-point scale of the per-token reward accumulator
pub const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000;

/// Maximum metadata length in bytes
pub const MAX_METADATA_LEN: usize = 200;

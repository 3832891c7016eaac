use anchor_lang::prelude::*;
use crate::constants::{BPS_DENOMINATOR, REFERRAL_SHARE_BPS};
use crate::errors::DishError;
use crate::state::ReferralBalance;

/// Where a mint's referral share went
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferralRouting {
    /// Escrowed for the referrer to claim
    Referrer(Pubkey, u64),
    /// No usable referrer: pushed straight to the protocol fee recipient
    Protocol(u64),
}

impl ReferralRouting {
    /// Amount that leaves the vault for the fee recipient
    pub fn protocol_amount(&self) -> u64 {
        match self {
            ReferralRouting::Protocol(amount) => *amount,
            ReferralRouting::Referrer(..) => 0,
        }
    }
}

/// Referral share of a mint charge (2.5%, rounded down)
pub fn referral_share(charge: u64) -> Result<u64> {
    let share = (charge as u128) * (REFERRAL_SHARE_BPS as u128) / (BPS_DENOMINATOR as u128);
    u64::try_from(share).map_err(|_| error!(DishError::CalculationOverflow))
}

/// Normalize the referrer named by a minter
///
/// The default key and the minter itself both count as no referrer, so a
/// minter can never route their own referral share back to themselves.
pub fn resolve_referrer(minter: &Pubkey, referrer: Option<Pubkey>) -> Option<Pubkey> {
    referrer.filter(|r| *r != Pubkey::default() && r != minter)
}

/// Escrow `amount` for the referrer, or route it to the protocol when there is none
///
/// A named referrer must come with its own registered balance account.
pub fn accrue(
    pool: Option<&mut ReferralBalance>,
    referrer: Option<Pubkey>,
    amount: u64,
) -> Result<ReferralRouting> {
    let Some(referrer) = referrer else {
        return Ok(ReferralRouting::Protocol(amount));
    };
    let pool = pool.ok_or(DishError::InvalidReferrer)?;
    require_keys_eq!(pool.authority, referrer, DishError::InvalidReferrer);

    let pending = pool
        .pending
        .checked_add(amount)
        .ok_or(DishError::CalculationOverflow)?;
    let referred_mints = pool
        .referred_mints
        .checked_add(1)
        .ok_or(DishError::CalculationOverflow)?;

    pool.pending = pending;
    pool.referred_mints = referred_mints;
    Ok(ReferralRouting::Referrer(referrer, amount))
}

/// Drain the referrer's pending balance; zero is a valid no-op
pub fn claim(pool: &mut ReferralBalance) -> Result<u64> {
    let amount = pool.pending;
    if amount == 0 {
        return Ok(0);
    }
    pool.claimed = pool
        .claimed
        .checked_add(amount)
        .ok_or(DishError::CalculationOverflow)?;
    pool.pending = 0;
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::error_name;

    fn pool_for(authority: Pubkey) -> ReferralBalance {
        ReferralBalance {
            authority,
            ..Default::default()
        }
    }

    #[test]
    fn missing_referrer_routes_to_protocol() {
        assert_eq!(accrue(None, None, 50_000).unwrap(), ReferralRouting::Protocol(50_000));
    }

    #[test]
    fn self_and_default_referrers_are_dropped() {
        let minter = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        assert_eq!(resolve_referrer(&minter, Some(minter)), None);
        assert_eq!(resolve_referrer(&minter, Some(Pubkey::default())), None);
        assert_eq!(resolve_referrer(&minter, None), None);
        assert_eq!(resolve_referrer(&minter, Some(other)), Some(other));
    }

    #[test]
    fn accrues_then_claims_once() {
        let referrer = Pubkey::new_unique();
        let mut pool = pool_for(referrer);

        accrue(Some(&mut pool), Some(referrer), 25_000).unwrap();
        accrue(Some(&mut pool), Some(referrer), 5_000).unwrap();
        assert_eq!(pool.pending, 30_000);
        assert_eq!(pool.referred_mints, 2);

        assert_eq!(claim(&mut pool).unwrap(), 30_000);
        assert_eq!(claim(&mut pool).unwrap(), 0);
        assert_eq!(pool.claimed, 30_000);
    }

    #[test]
    fn foreign_pool_is_rejected() {
        let referrer = Pubkey::new_unique();
        let mut pool = pool_for(Pubkey::new_unique());

        let err = accrue(Some(&mut pool), Some(referrer), 1_000).unwrap_err();
        assert_eq!(error_name(&err), "InvalidReferrer");
        assert_eq!(pool.pending, 0);

        let err = accrue(None, Some(referrer), 1_000).unwrap_err();
        assert_eq!(error_name(&err), "InvalidReferrer");
    }

    #[test]
    fn referral_share_is_two_and_a_half_percent() {
        assert_eq!(referral_share(1_562_500).unwrap(), 39_062);
        assert_eq!(referral_share(2_000_000).unwrap(), 50_000);
    }
}

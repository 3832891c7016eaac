use anchor_lang::prelude::*;
use crate::constants::MAX_SPEND;
use crate::errors::DishError;
use crate::state::Holding;

/// Lifetime spend after charging `cost`, or ExceedsMaxSpend
///
/// The cap is per (account, dish): spending on one dish never reduces the
/// allowance on another.
pub fn check(holding: &Holding, cost: u64) -> Result<u64> {
    let spent = holding
        .usdc_spent
        .checked_add(cost)
        .ok_or(DishError::ExceedsMaxSpend)?;
    require!(spent <= MAX_SPEND, DishError::ExceedsMaxSpend);
    Ok(spent)
}

/// Check the cap and record the spend; the record never resets
pub fn check_and_record(holding: &mut Holding, cost: u64) -> Result<()> {
    holding.usdc_spent = check(holding, cost)?;
    Ok(())
}

pub fn remaining_allowance(holding: &Holding) -> u64 {
    MAX_SPEND.saturating_sub(holding.usdc_spent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::error_name;

    #[test]
    fn records_until_the_cap() {
        let mut holding = Holding::default();
        check_and_record(&mut holding, 6_000_000).unwrap();
        assert_eq!(remaining_allowance(&holding), 4_000_000);

        let err = check_and_record(&mut holding, 5_000_000).unwrap_err();
        assert_eq!(error_name(&err), "ExceedsMaxSpend");
        assert_eq!(holding.usdc_spent, 6_000_000);

        check_and_record(&mut holding, 4_000_000).unwrap();
        assert_eq!(remaining_allowance(&holding), 0);
    }

    #[test]
    fn exactly_the_cap_is_allowed() {
        let mut holding = Holding::default();
        check_and_record(&mut holding, MAX_SPEND).unwrap();
        assert!(check(&holding, 1).is_err());
    }

    #[test]
    fn overflowing_spend_is_a_cap_violation() {
        let holding = Holding {
            usdc_spent: 1,
            ..Default::default()
        };
        let err = check(&holding, u64::MAX).unwrap_err();
        assert_eq!(error_name(&err), "ExceedsMaxSpend");
    }
}

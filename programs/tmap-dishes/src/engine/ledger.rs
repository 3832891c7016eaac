use anchor_lang::prelude::*;
use crate::errors::DishError;
use crate::state::{Dish, Holding};

/// How a balance change moved an account across the zero line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Zero before and after, or positive before and after
    Unchanged,
    /// 0 -> positive
    BecameHolder,
    /// positive -> 0
    StoppedHolding,
}

impl Transition {
    pub fn between(before: u64, after: u64) -> Self {
        match (before == 0, after == 0) {
            (true, false) => Transition::BecameHolder,
            (false, true) => Transition::StoppedHolding,
            _ => Transition::Unchanged,
        }
    }
}

/// Credit freshly minted tokens and grow the supply
pub fn apply_mint(dish: &mut Dish, holding: &mut Holding, amount: u64) -> Result<Transition> {
    let before = holding.balance;
    let balance = before
        .checked_add(amount)
        .ok_or(DishError::CalculationOverflow)?;
    let total_supply = dish
        .total_supply
        .checked_add(amount)
        .ok_or(DishError::CalculationOverflow)?;
    let transition = Transition::between(before, balance);
    let holder_count = holders_after(dish.holder_count, &[transition])?;

    holding.balance = balance;
    dish.total_supply = total_supply;
    dish.holder_count = holder_count;
    Ok(transition)
}

/// Debit sold tokens and shrink the supply
pub fn apply_sell(dish: &mut Dish, holding: &mut Holding, amount: u64) -> Result<Transition> {
    require!(holding.balance >= amount, DishError::InsufficientBalance);

    let before = holding.balance;
    let balance = before - amount;
    let total_supply = dish
        .total_supply
        .checked_sub(amount)
        .ok_or(DishError::CalculationOverflow)?;
    let transition = Transition::between(before, balance);
    let holder_count = holders_after(dish.holder_count, &[transition])?;

    holding.balance = balance;
    dish.total_supply = total_supply;
    dish.holder_count = holder_count;
    Ok(transition)
}

/// Move tokens between two holdings of the same dish; supply is untouched
///
/// Returns the (sender, recipient) transitions.
pub fn apply_transfer(
    dish: &mut Dish,
    from: &mut Holding,
    to: &mut Holding,
    amount: u64,
) -> Result<(Transition, Transition)> {
    require!(from.balance >= amount, DishError::InsufficientBalance);

    let from_after = from.balance - amount;
    let to_after = to
        .balance
        .checked_add(amount)
        .ok_or(DishError::CalculationOverflow)?;
    let sent = Transition::between(from.balance, from_after);
    let received = Transition::between(to.balance, to_after);
    let holder_count = holders_after(dish.holder_count, &[sent, received])?;

    from.balance = from_after;
    to.balance = to_after;
    dish.holder_count = holder_count;
    Ok((sent, received))
}

fn holders_after(holder_count: u64, transitions: &[Transition]) -> Result<u64> {
    transitions.iter().try_fold(holder_count, |count, transition| {
        let next = match transition {
            Transition::BecameHolder => count.checked_add(1),
            Transition::StoppedHolding => count.checked_sub(1),
            Transition::Unchanged => Some(count),
        };
        next.ok_or_else(|| error!(DishError::CalculationOverflow))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::error_name;

    fn holding(balance: u64) -> Holding {
        Holding {
            owner: Pubkey::new_unique(),
            balance,
            ..Default::default()
        }
    }

    #[test]
    fn first_mint_adds_a_holder() {
        let mut dish = Dish::default();
        let mut a = holding(0);

        assert_eq!(apply_mint(&mut dish, &mut a, 5).unwrap(), Transition::BecameHolder);
        assert_eq!(apply_mint(&mut dish, &mut a, 2).unwrap(), Transition::Unchanged);
        assert_eq!(dish.total_supply, 7);
        assert_eq!(dish.holder_count, 1);
        assert_eq!(a.balance, 7);
    }

    #[test]
    fn full_sell_removes_the_holder_but_keeps_the_position() {
        let mut dish = Dish::default();
        let mut a = holding(0);
        apply_mint(&mut dish, &mut a, 4).unwrap();

        assert_eq!(apply_sell(&mut dish, &mut a, 1).unwrap(), Transition::Unchanged);
        assert_eq!(apply_sell(&mut dish, &mut a, 3).unwrap(), Transition::StoppedHolding);
        assert_eq!(dish.total_supply, 0);
        assert_eq!(dish.holder_count, 0);
        assert_eq!(a.balance, 0);
    }

    #[test]
    fn oversell_is_rejected_without_mutation() {
        let mut dish = Dish::default();
        let mut a = holding(0);
        apply_mint(&mut dish, &mut a, 2).unwrap();

        let err = apply_sell(&mut dish, &mut a, 3).unwrap_err();
        assert_eq!(error_name(&err), "InsufficientBalance");
        assert_eq!(a.balance, 2);
        assert_eq!(dish.total_supply, 2);
    }

    #[test]
    fn transfer_reports_both_transitions() {
        let mut dish = Dish::default();
        let mut a = holding(0);
        let mut b = holding(0);
        apply_mint(&mut dish, &mut a, 6).unwrap();

        let (sent, received) = apply_transfer(&mut dish, &mut a, &mut b, 6).unwrap();
        assert_eq!(sent, Transition::StoppedHolding);
        assert_eq!(received, Transition::BecameHolder);
        assert_eq!(dish.holder_count, 1);
        assert_eq!(dish.total_supply, a.balance + b.balance);
    }

    #[test]
    fn partial_transfer_grows_holder_count() {
        let mut dish = Dish::default();
        let mut a = holding(0);
        let mut b = holding(0);
        apply_mint(&mut dish, &mut a, 6).unwrap();

        apply_transfer(&mut dish, &mut a, &mut b, 2).unwrap();
        assert_eq!(dish.holder_count, 2);
        assert_eq!((a.balance, b.balance), (4, 2));
    }

    #[test]
    fn transfer_beyond_balance_is_rejected() {
        let mut dish = Dish::default();
        let mut a = holding(0);
        let mut b = holding(0);
        apply_mint(&mut dish, &mut a, 1).unwrap();

        let err = apply_transfer(&mut dish, &mut a, &mut b, 2).unwrap_err();
        assert_eq!(error_name(&err), "InsufficientBalance");
        assert_eq!((a.balance, b.balance, dish.holder_count), (1, 0, 1));
    }

    #[test]
    fn holder_count_overflow_leaves_balances_untouched() {
        let mut dish = Dish {
            holder_count: u64::MAX,
            ..Default::default()
        };
        let mut a = holding(0);

        let err = apply_mint(&mut dish, &mut a, 3).unwrap_err();
        assert_eq!(error_name(&err), "CalculationOverflow");
        assert_eq!((a.balance, dish.total_supply, dish.holder_count), (0, 0, u64::MAX));
    }

    #[test]
    fn holder_count_underflow_leaves_balances_untouched() {
        // inconsistent dish: a balance with no counted holder
        let mut dish = Dish {
            total_supply: 4,
            ..Default::default()
        };
        let mut a = holding(4);
        let mut b = holding(0);

        let err = apply_sell(&mut dish, &mut a, 4).unwrap_err();
        assert_eq!(error_name(&err), "CalculationOverflow");
        assert_eq!((a.balance, dish.total_supply), (4, 4));

        let err = apply_transfer(&mut dish, &mut a, &mut b, 4).unwrap_err();
        assert_eq!(error_name(&err), "CalculationOverflow");
        assert_eq!((a.balance, b.balance, dish.holder_count), (4, 0, 0));
    }
}

//! Goal-completion and debt-payoff timelines.
//!
//! These sit beside the profile/advice pipeline rather than inside it:
//! nothing in the recommendation or allocation rules depends on them.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;
use crate::records::{DebtObligation, SavingsGoal};
use crate::types::{Money, Percent};
use crate::AdvisorResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Progress towards one savings goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal_id: String,
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    /// Never negative; an overfunded goal has nothing remaining
    pub remaining_amount: Money,
    /// `None` when the target is zero
    pub progress_pct: Option<Percent>,
    /// `None` when no contribution was supplied or it cannot close the gap
    pub months_to_goal: Option<u32>,
}

/// Payoff timeline for one debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoff {
    pub debt_id: String,
    pub creditor_name: String,
    pub remaining_amount: Money,
    pub monthly_payment: Money,
    pub interest_rate: Percent,
    /// `None` when the payment never covers the monthly interest
    pub payoff_months: Option<u32>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ceil_months(value: Decimal, context: &str) -> AdvisorResult<u32> {
    value.ceil().to_u32().ok_or_else(|| {
        AdvisorError::FinancialImpossibility(format!(
            "{context}: {value} months does not fit a month count"
        ))
    })
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// `current / target * 100`. May exceed 100 for an overfunded goal.
pub fn savings_progress(goal: &SavingsGoal) -> AdvisorResult<Percent> {
    if goal.target_amount.is_zero() {
        return Err(AdvisorError::DivisionByZero {
            context: format!("savings progress for goal '{}'", goal.id),
        });
    }
    Ok(goal.current_amount / goal.target_amount * dec!(100))
}

/// Whole months of `monthly_contribution` needed to reach the target.
pub fn months_to_goal(goal: &SavingsGoal, monthly_contribution: Money) -> AdvisorResult<u32> {
    let remaining = goal.target_amount - goal.current_amount;
    if remaining <= Decimal::ZERO {
        return Ok(0);
    }
    if monthly_contribution <= Decimal::ZERO {
        return Err(AdvisorError::InvalidInput {
            field: "monthly_contribution".into(),
            reason: "must be positive while the goal is not yet reached".into(),
        });
    }
    ceil_months(remaining / monthly_contribution, "months to goal")
}

/// Months until `remaining_amount` is repaid at `monthly_payment`, with
/// interest compounding monthly at `interest_rate / 12`.
///
/// A zero or negative payment yields 0 (nothing is scheduled). The count is
/// the first month whose closing balance is at or below zero, so a payment
/// that never covers the interest has no count at all.
pub fn debt_payoff_months(debt: &DebtObligation) -> AdvisorResult<u32> {
    let balance = debt.remaining_amount;
    let payment = debt.monthly_payment;

    if payment <= Decimal::ZERO || balance <= Decimal::ZERO {
        return Ok(0);
    }

    let monthly_rate = debt.interest_rate / dec!(100) / dec!(12);
    if monthly_rate <= Decimal::ZERO {
        return ceil_months(balance / payment, "debt payoff");
    }

    // n = -ln(1 - r*B/P) / ln(1 + r)
    let interest_share = monthly_rate * balance / payment;
    if interest_share >= Decimal::ONE {
        return Err(AdvisorError::FinancialImpossibility(format!(
            "monthly payment {payment} on debt '{}' does not cover the monthly interest of {}",
            debt.id,
            (balance * monthly_rate).round_dp(2)
        )));
    }

    let numerator = (Decimal::ONE - interest_share)
        .checked_ln()
        .ok_or_else(|| AdvisorError::FinancialImpossibility("debt payoff logarithm".into()))?;
    let denominator = (Decimal::ONE + monthly_rate)
        .checked_ln()
        .filter(|d| !d.is_zero())
        .ok_or_else(|| AdvisorError::DivisionByZero {
            context: "debt payoff rate logarithm".into(),
        })?;

    ceil_months(-numerator / denominator, "debt payoff")
}

/// Progress for every goal, with a months-to-goal estimate when a monthly
/// contribution is supplied.
pub fn goal_progress(
    goals: &[SavingsGoal],
    monthly_contribution: Option<Money>,
) -> Vec<GoalProgress> {
    goals
        .iter()
        .map(|g| GoalProgress {
            goal_id: g.id.clone(),
            name: g.name.clone(),
            target_amount: g.target_amount,
            current_amount: g.current_amount,
            remaining_amount: (g.target_amount - g.current_amount).max(Decimal::ZERO),
            progress_pct: savings_progress(g).ok(),
            months_to_goal: monthly_contribution.and_then(|c| months_to_goal(g, c).ok()),
        })
        .collect()
}

pub fn debt_payoff_schedule(debts: &[DebtObligation]) -> Vec<DebtPayoff> {
    debts
        .iter()
        .map(|d| DebtPayoff {
            debt_id: d.id.clone(),
            creditor_name: d.creditor_name.clone(),
            remaining_amount: d.remaining_amount,
            monthly_payment: d.monthly_payment,
            interest_rate: d.interest_rate,
            payoff_months: debt_payoff_months(d).ok(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    // ---------------------------------------------------------------
    // 1. Savings progress
    // ---------------------------------------------------------------
    #[test]
    fn test_savings_progress() {
        assert_eq!(savings_progress(&goal(dec!(8000), dec!(2000))).unwrap(), dec!(25));
        // overfunded goals exceed 100
        assert_eq!(savings_progress(&goal(dec!(100), dec!(150))).unwrap(), dec!(150));
    }

    #[test]
    fn test_savings_progress_zero_target() {
        let err = savings_progress(&goal(Decimal::ZERO, dec!(10))).unwrap_err();
        assert!(matches!(err, AdvisorError::DivisionByZero { .. }));
    }

    // ---------------------------------------------------------------
    // 2. Months to goal
    // ---------------------------------------------------------------
    #[test]
    fn test_months_to_goal_rounds_up() {
        // 6000 remaining at 700/month = 8.57 -> 9
        assert_eq!(months_to_goal(&goal(dec!(8000), dec!(2000)), dec!(700)).unwrap(), 9);
        assert_eq!(months_to_goal(&goal(dec!(8000), dec!(2000)), dec!(600)).unwrap(), 10);
    }

    #[test]
    fn test_months_to_goal_already_reached() {
        assert_eq!(months_to_goal(&goal(dec!(100), dec!(100)), Decimal::ZERO).unwrap(), 0);
        assert_eq!(months_to_goal(&goal(dec!(100), dec!(250)), dec!(10)).unwrap(), 0);
    }

    #[test]
    fn test_months_to_goal_requires_contribution() {
        let err = months_to_goal(&goal(dec!(100), dec!(0)), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidInput { .. }));
    }

    // ---------------------------------------------------------------
    // 3. Debt payoff
    // ---------------------------------------------------------------
    #[test]
    fn test_debt_payoff_zero_payment_is_zero() {
        assert_eq!(debt_payoff_months(&debt(dec!(1000), Decimal::ZERO, dec!(18))).unwrap(), 0);
    }

    #[test]
    fn test_debt_payoff_without_interest() {
        assert_eq!(debt_payoff_months(&debt(dec!(1000), dec!(300), Decimal::ZERO)).unwrap(), 4);
    }

    #[test]
    fn test_debt_payoff_with_interest() {
        // r = 1.5%/month: -ln(0.85) / ln(1.015) = 10.92 -> 11
        assert_eq!(debt_payoff_months(&debt(dec!(1000), dec!(100), dec!(18))).unwrap(), 11);
    }

    #[test]
    fn test_debt_payoff_interest_only_payment_is_impossible() {
        // 1.5% of 1000 = 15; paying exactly the interest never amortises
        let err = debt_payoff_months(&debt(dec!(1000), dec!(15), dec!(18))).unwrap_err();
        assert!(matches!(err, AdvisorError::FinancialImpossibility(_)));
    }

    #[test]
    fn test_debt_payoff_count_clears_the_balance() {
        // ln(1 + rB/P) / ln(1 + r) rounds to 10, but after ten payments of 100
        // at 1.5%/month about 90 is still owed; the eleventh clears it.
        let d = debt(dec!(1000), dec!(100), dec!(18));
        let months = debt_payoff_months(&d).unwrap();
        assert_eq!(months, 11);

        let r = dec!(0.015);
        let mut balance = d.remaining_amount;
        for _ in 0..months - 1 {
            balance = balance * (Decimal::ONE + r) - d.monthly_payment;
        }
        assert!(balance > Decimal::ZERO);
        assert!(balance * (Decimal::ONE + r) - d.monthly_payment <= Decimal::ZERO);
    }

    #[test]
    fn test_debt_payoff_below_interest_has_no_count() {
        // 10/month against 15 of monthly interest: the balance only grows
        let err = debt_payoff_months(&debt(dec!(1000), dec!(10), dec!(18))).unwrap_err();
        assert!(matches!(err, AdvisorError::FinancialImpossibility(_)));
    }

    // ---------------------------------------------------------------
    // 4. Batch views
    // ---------------------------------------------------------------
    #[test]
    fn test_goal_progress_view() {
        let goals = vec![goal(dec!(8000), dec!(2000)), goal(Decimal::ZERO, Decimal::ZERO)];
        let view = goal_progress(&goals, Some(dec!(700)));

        assert_eq!(view[0].progress_pct, Some(dec!(25)));
        assert_eq!(view[0].remaining_amount, dec!(6000));
        assert_eq!(view[0].months_to_goal, Some(9));
        assert_eq!(view[1].progress_pct, None);
        assert_eq!(view[1].months_to_goal, Some(0));

        let view = goal_progress(&goals, None);
        assert!(view.iter().all(|g| g.months_to_goal.is_none()));
    }

    #[test]
    fn test_debt_payoff_schedule_view() {
        let debts = vec![
            debt(dec!(1000), dec!(100), dec!(18)),
            debt(dec!(1000), dec!(10), dec!(18)),
        ];
        let view = debt_payoff_schedule(&debts);
        assert_eq!(view[0].payoff_months, Some(11));
        assert_eq!(view[1].payoff_months, None);
    }
}

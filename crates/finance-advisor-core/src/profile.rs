use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregate;
use crate::records::{DebtObligation, ExpenseRecord, IncomeRecord, SavingsGoal};
use crate::types::{Money, Percent};

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Debt-to-income above this forces a conservative profile.
pub const CONSERVATIVE_DTI_ABOVE: Percent = dec!(40);
/// Savings rate below this forces a conservative profile.
pub const CONSERVATIVE_SAVINGS_BELOW: Percent = dec!(10);
/// Debt-to-income must be below this for an aggressive profile.
pub const AGGRESSIVE_DTI_BELOW: Percent = dec!(20);
/// Savings rate must be above this for an aggressive profile.
pub const AGGRESSIVE_SAVINGS_ABOVE: Percent = dec!(20);
/// Months of fixed expenses that count as an emergency fund.
pub const EMERGENCY_FUND_MONTHS: Decimal = dec!(3);
/// Annual interest rate (%) above which a debt is high-interest.
pub const HIGH_INTEREST_RATE_ABOVE: Percent = dec!(15);
/// Ratio reported when annualised income is zero but the numerator is not.
pub const RATIO_CEILING: Percent = dec!(1000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

/// Derived snapshot of a user's finances. Recomputed from scratch for every
/// request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub total_income: Money,
    pub total_expenses: Money,
    pub fixed_expenses: Money,
    pub variable_expenses: Money,
    pub total_debt: Money,
    pub monthly_debt_payments: Money,
    pub current_savings: Money,
    /// Income minus expenses; negative on a deficit
    pub available_amount: Money,
    /// Outstanding debt over annualised income, in percent
    pub debt_to_income_ratio: Percent,
    /// Current savings over annualised income, in percent
    pub savings_rate: Percent,
    pub risk_profile: RiskProfile,
    pub has_emergency_fund: bool,
    pub has_high_interest_debt: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `numerator / (monthly_income * 12) * 100`.
///
/// Zero annual income yields 0 for a zero numerator and `RATIO_CEILING`
/// (with the numerator's sign) otherwise. Overflow also lands on the ceiling.
pub fn annualized_ratio(numerator: Money, monthly_income: Money) -> Percent {
    if numerator.is_zero() {
        return Decimal::ZERO;
    }
    let ceiling = if numerator.is_sign_negative() {
        -RATIO_CEILING
    } else {
        RATIO_CEILING
    };

    let Some(annual) = monthly_income.checked_mul(dec!(12)) else {
        warn!(%monthly_income, "annual income overflows; ratio reported at ceiling");
        return ceiling;
    };

    if annual.is_zero() {
        warn!(%numerator, "zero income; ratio reported at ceiling");
        return ceiling;
    }

    numerator
        .checked_div(annual)
        .and_then(|r| r.checked_mul(dec!(100)))
        .unwrap_or(ceiling)
}

/// Conservative is checked first and never overridden by the aggressive rule.
pub fn classify_risk(debt_to_income_ratio: Percent, savings_rate: Percent) -> RiskProfile {
    let mut risk = RiskProfile::Moderate;

    if debt_to_income_ratio > CONSERVATIVE_DTI_ABOVE || savings_rate < CONSERVATIVE_SAVINGS_BELOW
    {
        risk = RiskProfile::Conservative;
    } else if debt_to_income_ratio < AGGRESSIVE_DTI_BELOW && savings_rate > AGGRESSIVE_SAVINGS_ABOVE
    {
        risk = RiskProfile::Aggressive;
    }

    risk
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Reduce raw records into a [`FinancialProfile`]. Total over any input,
/// including empty collections.
pub fn build_profile(
    incomes: &[IncomeRecord],
    expenses: &[ExpenseRecord],
    savings_goals: &[SavingsGoal],
    debts: &[DebtObligation],
) -> FinancialProfile {
    let total_income = aggregate::total_income(incomes);
    let total_expenses = aggregate::total_expenses(expenses);
    let fixed_expenses = aggregate::fixed_expenses(expenses);
    let variable_expenses = total_expenses - fixed_expenses;

    let total_debt = aggregate::total_debt(debts);
    let monthly_debt_payments = aggregate::monthly_debt_payments(debts);
    let current_savings = aggregate::total_savings(savings_goals);
    let available_amount = aggregate::balance(total_income, total_expenses);

    let debt_to_income_ratio = annualized_ratio(total_debt, total_income);
    let savings_rate = annualized_ratio(current_savings, total_income);
    let risk_profile = classify_risk(debt_to_income_ratio, savings_rate);

    // an overflowing requirement is unreachable when positive, trivially met when negative
    let has_emergency_fund = fixed_expenses
        .checked_mul(EMERGENCY_FUND_MONTHS)
        .map_or(fixed_expenses.is_sign_negative(), |required| {
            current_savings >= required
        });
    let has_high_interest_debt = debts
        .iter()
        .any(|d| d.interest_rate > HIGH_INTEREST_RATE_ABOVE);

    debug!(
        %total_income,
        %total_expenses,
        %available_amount,
        %debt_to_income_ratio,
        %savings_rate,
        ?risk_profile,
        has_emergency_fund,
        has_high_interest_debt,
        "financial profile built"
    );

    FinancialProfile {
        total_income,
        total_expenses,
        fixed_expenses,
        variable_expenses,
        total_debt,
        monthly_debt_payments,
        current_savings,
        available_amount,
        debt_to_income_ratio,
        savings_rate,
        risk_profile,
        has_emergency_fund,
        has_high_interest_debt,
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::records::{
    effective_period, DebtObligation, ExpenseCategory, ExpenseRecord, IncomeRecord, IncomeSource,
    SavingsGoal,
};
use crate::types::Money;

// ---------------------------------------------------------------------------
// Generic folds
// ---------------------------------------------------------------------------

/// Sum the amount selected from every record. Empty input sums to zero.
pub fn total_of<T>(records: &[T], amount: impl Fn(&T) -> Money) -> Money {
    records.iter().map(amount).sum()
}

/// Sum the amount selected from records matching `predicate`.
pub fn filtered_sum<T>(
    records: &[T],
    predicate: impl Fn(&T) -> bool,
    amount: impl Fn(&T) -> Money,
) -> Money {
    records
        .iter()
        .filter(|r| predicate(*r))
        .map(amount)
        .sum()
}

/// Group records by key and sum their amounts. Only keys present in the
/// input appear in the result.
pub fn group_sum_by<T, K: Ord>(
    records: &[T],
    key: impl Fn(&T) -> K,
    amount: impl Fn(&T) -> Money,
) -> BTreeMap<K, Money> {
    let mut groups = BTreeMap::new();
    for record in records {
        *groups.entry(key(record)).or_insert(Decimal::ZERO) += amount(record);
    }
    groups
}

// ---------------------------------------------------------------------------
// Named aggregates
// ---------------------------------------------------------------------------

pub fn total_income(incomes: &[IncomeRecord]) -> Money {
    total_of(incomes, |i| i.amount)
}

pub fn total_expenses(expenses: &[ExpenseRecord]) -> Money {
    total_of(expenses, |e| e.amount)
}

pub fn fixed_expenses(expenses: &[ExpenseRecord]) -> Money {
    filtered_sum(expenses, |e| e.is_fixed, |e| e.amount)
}

/// Savings held across all goals (sum of `current_amount`).
pub fn total_savings(goals: &[SavingsGoal]) -> Money {
    total_of(goals, |g| g.current_amount)
}

/// Outstanding principal across all debts (sum of `remaining_amount`).
pub fn total_debt(debts: &[DebtObligation]) -> Money {
    total_of(debts, |d| d.remaining_amount)
}

pub fn monthly_debt_payments(debts: &[DebtObligation]) -> Money {
    total_of(debts, |d| d.monthly_payment)
}

/// Income minus expenses. Negative means a deficit.
pub fn balance(income: Money, expenses: Money) -> Money {
    income - expenses
}

pub fn expenses_by_category(expenses: &[ExpenseRecord]) -> BTreeMap<ExpenseCategory, Money> {
    group_sum_by(expenses, |e| e.category, |e| e.amount)
}

pub fn incomes_by_source(incomes: &[IncomeRecord]) -> BTreeMap<IncomeSource, Money> {
    group_sum_by(incomes, |i| i.source, |i| i.amount)
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Headline totals for a set of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub total_savings: Money,
    pub balance: Money,
    /// Recurring income minus recurring expenses, normalised to one month
    pub monthly_projection: Money,
}

fn monthly_recurring_income(incomes: &[IncomeRecord]) -> Money {
    incomes
        .iter()
        .filter_map(|i| {
            effective_period(i.is_recurring, i.recurring_period).map(|p| p.to_monthly(i.amount))
        })
        .sum()
}

fn monthly_recurring_expenses(expenses: &[ExpenseRecord]) -> Money {
    expenses
        .iter()
        .filter_map(|e| {
            effective_period(e.is_recurring, e.recurring_period).map(|p| p.to_monthly(e.amount))
        })
        .sum()
}

pub fn summarize(
    incomes: &[IncomeRecord],
    expenses: &[ExpenseRecord],
    goals: &[SavingsGoal],
) -> FinancialSummary {
    let income = total_income(incomes);
    let spent = total_expenses(expenses);

    FinancialSummary {
        total_income: income,
        total_expenses: spent,
        total_savings: total_savings(goals),
        balance: balance(income, spent),
        monthly_projection: monthly_recurring_income(incomes)
            - monthly_recurring_expenses(expenses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecurrencePeriod;
    use crate::test_utils::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_of_empty_is_zero() {
        let incomes: Vec<IncomeRecord> = vec![];
        assert_eq!(total_income(&incomes), Decimal::ZERO);
        assert_eq!(total_of(&incomes, |i| i.amount), Decimal::ZERO);
    }

    #[test]
    fn test_total_income_sums_all_sources() {
        let incomes = vec![
            income(dec!(3500), IncomeSource::Salary),
            income(dec!(850), IncomeSource::Business),
            income(dec!(450), IncomeSource::Freelance),
            income(dec!(120), IncomeSource::Investment),
        ];
        assert_eq!(total_income(&incomes), dec!(4920));
    }

    #[test]
    fn test_fixed_and_variable_split() {
        let expenses = vec![
            expense(dec!(900), ExpenseCategory::Utilities, true),
            expense(dec!(400), ExpenseCategory::Food, false),
            expense(dec!(150.50), ExpenseCategory::Services, true),
        ];
        assert_eq!(total_expenses(&expenses), dec!(1450.50));
        assert_eq!(fixed_expenses(&expenses), dec!(1050.50));
        assert_eq!(
            filtered_sum(&expenses, |e| !e.is_fixed, |e| e.amount),
            dec!(400)
        );
    }

    #[test]
    fn test_group_sum_omits_absent_keys() {
        let expenses = vec![
            expense(dec!(200), ExpenseCategory::Food, false),
            expense(dec!(50), ExpenseCategory::Food, false),
            expense(dec!(80), ExpenseCategory::Transport, false),
        ];
        let grouped = expenses_by_category(&expenses);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&ExpenseCategory::Food], dec!(250));
        assert_eq!(grouped[&ExpenseCategory::Transport], dec!(80));
        assert!(!grouped.contains_key(&ExpenseCategory::Healthcare));
    }

    #[test]
    fn test_incomes_by_source() {
        let incomes = vec![
            income(dec!(1000), IncomeSource::Salary),
            income(dec!(300), IncomeSource::Freelance),
            income(dec!(200), IncomeSource::Freelance),
        ];
        let grouped = incomes_by_source(&incomes);
        let keys: Vec<_> = grouped.keys().copied().collect();
        assert_eq!(keys, vec![IncomeSource::Salary, IncomeSource::Freelance]);
        assert_eq!(grouped[&IncomeSource::Freelance], dec!(500));
    }

    #[test]
    fn test_negative_amounts_accepted_as_is() {
        let incomes = vec![
            income(dec!(100), IncomeSource::Other),
            income(dec!(-30), IncomeSource::Other),
        ];
        assert_eq!(total_income(&incomes), dec!(70));
    }

    #[test]
    fn test_debt_totals() {
        let debts = vec![
            debt(dec!(1000), dec!(100), dec!(18)),
            debt(dec!(5000), dec!(250), dec!(6)),
        ];
        assert_eq!(total_debt(&debts), dec!(6000));
        assert_eq!(monthly_debt_payments(&debts), dec!(350));
    }

    #[test]
    fn test_balance_can_be_negative() {
        assert_eq!(balance(dec!(1000), dec!(1250)), dec!(-250));
    }

    #[test]
    fn test_summarize_monthly_projection() {
        let incomes = vec![
            recurring_income(dec!(3000), RecurrencePeriod::Monthly),
            recurring_income(dec!(1200), RecurrencePeriod::Yearly),
            income(dec!(500), IncomeSource::Freelance),
        ];
        let mut rent = expense(dec!(900), ExpenseCategory::Utilities, true);
        rent.is_recurring = true;
        let one_off = expense(dec!(400), ExpenseCategory::Entertainment, false);
        let goals = vec![goal(dec!(10000), dec!(2500))];

        let summary = summarize(&incomes, &[rent, one_off], &goals);

        assert_eq!(
            summary,
            FinancialSummary {
                total_income: dec!(4700),
                total_expenses: dec!(1300),
                total_savings: dec!(2500),
                balance: dec!(3400),
                // 3000 + 100 recurring income, 900 recurring expense
                monthly_projection: dec!(2200),
            }
        );
    }
}

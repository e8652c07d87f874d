//! Optional strict checks for callers that want to reject bad records
//! before they reach the profile builder. The core itself never calls this.

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::error::AdvisorError;
use crate::records::{DebtObligation, ExpenseRecord, IncomeRecord, SavingsGoal};
use crate::types::Money;
use crate::AdvisorResult;

fn check_non_negative(field: String, value: Money, errors: &mut Vec<AdvisorError>) {
    if value < Decimal::ZERO {
        errors.push(AdvisorError::InvalidInput {
            field,
            reason: format!("must be non-negative, got {value}"),
        });
    }
}

fn note_duplicate_ids<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
    warnings: &mut Vec<String>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            warnings.push(format!("Duplicate {kind} id '{id}'"));
        }
    }
}

/// Every issue found across the record collections.
#[derive(Debug, Default)]
pub struct ValidationIssues {
    /// Hard violations, in record order
    pub errors: Vec<AdvisorError>,
    pub warnings: Vec<String>,
}

impl ValidationIssues {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Scan all records without stopping at the first violation.
pub fn collect_issues(
    incomes: &[IncomeRecord],
    expenses: &[ExpenseRecord],
    savings_goals: &[SavingsGoal],
    debts: &[DebtObligation],
) -> ValidationIssues {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for i in incomes {
        check_non_negative(format!("incomes[{}].amount", i.id), i.amount, &mut errors);
        if i.is_recurring && i.recurring_period.is_none() {
            warnings.push(format!(
                "Income '{}' is recurring with no period; treated as monthly",
                i.id
            ));
        }
    }

    for e in expenses {
        check_non_negative(format!("expenses[{}].amount", e.id), e.amount, &mut errors);
        if e.is_recurring && e.recurring_period.is_none() {
            warnings.push(format!(
                "Expense '{}' is recurring with no period; treated as monthly",
                e.id
            ));
        }
    }

    for g in savings_goals {
        check_non_negative(
            format!("savings_goals[{}].target_amount", g.id),
            g.target_amount,
            &mut errors,
        );
        check_non_negative(
            format!("savings_goals[{}].current_amount", g.id),
            g.current_amount,
            &mut errors,
        );
        if g.current_amount > g.target_amount {
            warnings.push(format!(
                "Savings goal '{}' holds {} against a target of {}",
                g.id, g.current_amount, g.target_amount
            ));
        }
    }

    for d in debts {
        let fields = [
            ("total_amount", d.total_amount),
            ("remaining_amount", d.remaining_amount),
            ("monthly_payment", d.monthly_payment),
            ("interest_rate", d.interest_rate),
        ];
        for (name, value) in fields {
            check_non_negative(format!("debts[{}].{name}", d.id), value, &mut errors);
        }
        if d.remaining_amount > d.total_amount {
            errors.push(AdvisorError::InvalidInput {
                field: format!("debts[{}].remaining_amount", d.id),
                reason: format!(
                    "remaining {} exceeds total {}",
                    d.remaining_amount, d.total_amount
                ),
            });
        }
    }

    note_duplicate_ids("income", incomes.iter().map(|i| i.id.as_str()), &mut warnings);
    note_duplicate_ids("expense", expenses.iter().map(|e| e.id.as_str()), &mut warnings);
    note_duplicate_ids("goal", savings_goals.iter().map(|g| g.id.as_str()), &mut warnings);
    note_duplicate_ids("debt", debts.iter().map(|d| d.id.as_str()), &mut warnings);

    ValidationIssues { errors, warnings }
}

/// Validate record collections.
///
/// Hard violations (negative amounts, remaining debt above the original
/// amount, negative rates) return the first `InvalidInput`. Soft issues come
/// back as warnings.
pub fn validate_records(
    incomes: &[IncomeRecord],
    expenses: &[ExpenseRecord],
    savings_goals: &[SavingsGoal],
    debts: &[DebtObligation],
) -> AdvisorResult<Vec<String>> {
    let issues = collect_issues(incomes, expenses, savings_goals, debts);
    match issues.errors.into_iter().next() {
        Some(first) => Err(first),
        None => Ok(issues.warnings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ExpenseCategory, IncomeSource};
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_clean_records_pass() {
        let warnings = validate_records(
            &[income(dec!(3500), IncomeSource::Salary)],
            &[expense(dec!(900), ExpenseCategory::Utilities, true)],
            &[goal(dec!(1000), dec!(100))],
            &[debt(dec!(500), dec!(50), dec!(12))],
        )
        .unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_negative_income_rejected() {
        let err = validate_records(&[income(dec!(-1), IncomeSource::Salary)], &[], &[], &[])
            .unwrap_err();
        match err {
            AdvisorError::InvalidInput { field, .. } => assert!(field.ends_with(".amount")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_remaining_above_total_rejected() {
        let mut d = debt(dec!(500), dec!(50), dec!(12));
        d.total_amount = dec!(400);
        assert!(validate_records(&[], &[], &[], &[d]).is_err());
    }

    #[test]
    fn test_negative_interest_rejected() {
        let d = debt(dec!(500), dec!(50), dec!(-1));
        assert!(validate_records(&[], &[], &[], &[d]).is_err());
    }

    #[test]
    fn test_soft_warnings() {
        let mut inc = income(dec!(100), IncomeSource::Salary);
        inc.is_recurring = true;
        let dup = inc.clone();
        let warnings = validate_records(
            &[inc, dup],
            &[],
            &[goal(dec!(100), dec!(150))],
            &[],
        )
        .unwrap();

        // two recurring-without-period, one overfunded goal, one duplicate id
        assert_eq!(warnings.len(), 4);
        assert!(warnings.iter().any(|w| w.starts_with("Duplicate income id")));
        assert!(warnings.iter().any(|w| w.contains("against a target")));
    }

    #[test]
    fn test_collect_issues_keeps_scanning_past_errors() {
        let bad = income(dec!(-1), IncomeSource::Salary);
        let mut d = debt(dec!(500), dec!(50), dec!(-2));
        d.total_amount = dec!(400);
        let issues = collect_issues(
            &[bad.clone(), bad],
            &[],
            &[goal(dec!(100), dec!(150))],
            &[d],
        );

        assert!(!issues.is_valid());
        // two negative incomes, negative rate, remaining above total
        assert_eq!(issues.errors.len(), 4);
        assert!(issues.warnings.iter().any(|w| w.contains("against a target")));
        assert!(issues.warnings.iter().any(|w| w.starts_with("Duplicate income id")));
    }
}

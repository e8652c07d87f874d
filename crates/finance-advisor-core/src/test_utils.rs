//! Record builders shared by unit tests.

use chrono::NaiveDate;

use crate::records::{
    DebtObligation, ExpenseCategory, ExpenseRecord, GoalCategory, IncomeRecord, IncomeSource,
    PaymentMethod, RecurrencePeriod, SavingsGoal,
};
use crate::types::{Money, Percent, Priority};

pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

pub fn income(amount: Money, source: IncomeSource) -> IncomeRecord {
    IncomeRecord {
        id: format!("inc-{amount}"),
        amount,
        source,
        description: String::new(),
        date: date(),
        is_recurring: false,
        recurring_period: None,
    }
}

pub fn recurring_income(amount: Money, period: RecurrencePeriod) -> IncomeRecord {
    IncomeRecord {
        is_recurring: true,
        recurring_period: Some(period),
        ..income(amount, IncomeSource::Salary)
    }
}

pub fn expense(amount: Money, category: ExpenseCategory, is_fixed: bool) -> ExpenseRecord {
    ExpenseRecord {
        id: format!("exp-{amount}"),
        amount,
        category,
        subcategory: None,
        description: String::new(),
        date: date(),
        payment_method: PaymentMethod::default(),
        is_fixed,
        is_recurring: false,
        recurring_period: None,
    }
}

pub fn goal(target: Money, current: Money) -> SavingsGoal {
    SavingsGoal {
        id: format!("goal-{target}"),
        name: "Goal".into(),
        target_amount: target,
        current_amount: current,
        target_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        priority: Priority::Medium,
        category: GoalCategory::Other,
    }
}

pub fn debt(remaining: Money, monthly_payment: Money, interest_rate: Percent) -> DebtObligation {
    DebtObligation {
        id: format!("debt-{remaining}"),
        creditor_name: "Bank".into(),
        total_amount: remaining,
        remaining_amount: remaining,
        monthly_payment,
        interest_rate,
        due_date: NaiveDate::from_ymd_opt(2027, 6, 30).unwrap(),
        priority: Priority::High,
    }
}

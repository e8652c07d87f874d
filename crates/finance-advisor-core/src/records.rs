use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent, Priority};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSource {
    Salary,
    Business,
    Freelance,
    Investment,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Entertainment,
    Healthcare,
    Education,
    Utilities,
    Debt,
    Services,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    Emergency,
    Vacation,
    House,
    Car,
    Education,
    Investment,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    Cash,
    Card,
    Yape,
    Plin,
    BankTransfer,
    Other,
}

/// How often a recurring record repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrencePeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrencePeriod {
    /// Normalise an amount paid once per period to a monthly figure.
    pub fn to_monthly(self, amount: Money) -> Money {
        match self {
            // 52 weeks spread over 12 months; multiply first to keep precision
            RecurrencePeriod::Weekly => amount * Decimal::from(52) / Decimal::from(12),
            RecurrencePeriod::Monthly => amount,
            RecurrencePeriod::Yearly => amount / Decimal::from(12),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Payment instrument attached to an expense. Display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub kind: PaymentMethodKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_four_digits: Option<String>,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod {
            kind: PaymentMethodKind::Cash,
            name: "Cash".to_string(),
            last_four_digits: None,
        }
    }
}

/// A single income entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: String,
    pub amount: Money,
    pub source: IncomeSource,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_period: Option<RecurrencePeriod>,
}

/// A single expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: String,
    pub amount: Money,
    pub category: ExpenseCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Fixed obligations (rent, insurance) vs discretionary spending
    pub is_fixed: bool,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_period: Option<RecurrencePeriod>,
}

/// A savings target. `current_amount > target_amount` is tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    pub target_date: NaiveDate,
    pub priority: Priority,
    pub category: GoalCategory,
}

/// An outstanding debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtObligation {
    pub id: String,
    #[serde(default)]
    pub creditor_name: String,
    pub total_amount: Money,
    pub remaining_amount: Money,
    pub monthly_payment: Money,
    /// Annual interest rate as a percentage (18 = 18%)
    pub interest_rate: Percent,
    pub due_date: NaiveDate,
    pub priority: Priority,
}

/// Recurrence period for a record, treating a recurring record with no
/// period as monthly. Returns `None` for one-off records.
pub(crate) fn effective_period(
    is_recurring: bool,
    period: Option<RecurrencePeriod>,
) -> Option<RecurrencePeriod> {
    if is_recurring {
        Some(period.unwrap_or(RecurrencePeriod::Monthly))
    } else {
        None
    }
}

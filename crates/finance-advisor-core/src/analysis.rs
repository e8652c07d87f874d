use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::advisor::allocation::{compute_allocation, AllocationPlan};
use crate::advisor::recommendations::{generate_recommendations_with, Recommendation};
use crate::aggregate::{self, FinancialSummary};
use crate::format::{format_percentage, MoneyFormat, NumberLocale};
use crate::planning::{self, DebtPayoff, GoalProgress};
use crate::profile::{build_profile, FinancialProfile, RATIO_CEILING};
use crate::records::{
    DebtObligation, ExpenseCategory, ExpenseRecord, IncomeRecord, IncomeSource, SavingsGoal,
};
use crate::types::{with_metadata, ComputationOutput, Currency, Money};
use crate::validation::collect_issues;
use crate::AdvisorResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything needed for a full analysis in one request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisInput {
    #[serde(default)]
    pub incomes: Vec<IncomeRecord>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub savings_goals: Vec<SavingsGoal>,
    #[serde(default)]
    pub debts: Vec<DebtObligation>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub locale: NumberLocale,
    /// Reject invalid records instead of analysing them as-is
    #[serde(default)]
    pub strict: bool,
}

impl AnalysisInput {
    pub fn money_format(&self) -> MoneyFormat {
        MoneyFormat::new(self.currency.clone(), self.locale)
    }

    pub fn profile(&self) -> FinancialProfile {
        build_profile(&self.incomes, &self.expenses, &self.savings_goals, &self.debts)
    }

    pub fn summary(&self) -> FinancialSummary {
        aggregate::summarize(&self.incomes, &self.expenses, &self.savings_goals)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: FinancialSummary,
    pub profile: FinancialProfile,
    pub recommendations: Vec<Recommendation>,
    pub allocation: AllocationPlan,
    pub expenses_by_category: BTreeMap<ExpenseCategory, Money>,
    pub incomes_by_source: BTreeMap<IncomeSource, Money>,
    pub goal_progress: Vec<GoalProgress>,
    pub debt_payoff: Vec<DebtPayoff>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Run the whole pipeline: summary, profile, recommendations, allocation and
/// the goal/debt timelines, wrapped in the standard output envelope.
pub fn analyze(input: &AnalysisInput) -> AdvisorResult<ComputationOutput<AnalysisReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    let issues = collect_issues(
        &input.incomes,
        &input.expenses,
        &input.savings_goals,
        &input.debts,
    );
    if input.strict {
        if let Some(first) = issues.errors.into_iter().next() {
            return Err(first);
        }
    } else {
        warnings.extend(issues.errors.iter().map(|e| format!("{e} (analysed as-is)")));
    }
    warnings.extend(issues.warnings);

    let fmt = input.money_format();
    let profile = input.profile();
    let recommendations = generate_recommendations_with(&profile, &fmt);
    let allocation = compute_allocation(&profile);

    // --- Degenerate figures worth flagging ---
    if profile.total_income.is_zero() {
        warnings.push(format!(
            "Total income is zero; ratios use the zero-income policy (0 or {})",
            format_percentage(RATIO_CEILING)
        ));
    }
    if profile.available_amount < Decimal::ZERO {
        warnings.push(format!(
            "Expenses exceed income by {}; suggested amounts and allocations are negative",
            fmt.format(-profile.available_amount)
        ));
    }
    if profile.available_amount > Decimal::ZERO && allocation.total() > profile.available_amount {
        warnings.push(format!(
            "Allocation commits {} against {} available",
            fmt.format(allocation.total()),
            fmt.format(profile.available_amount)
        ));
    }

    let debt_payoff = planning::debt_payoff_schedule(&input.debts);
    for d in debt_payoff.iter().filter(|d| d.payoff_months.is_none()) {
        if d.monthly_payment > Decimal::ZERO {
            warnings.push(format!(
                "Debt '{}' is not amortising: the monthly payment does not cover interest",
                d.debt_id
            ));
        }
    }

    let report = AnalysisReport {
        summary: input.summary(),
        expenses_by_category: aggregate::expenses_by_category(&input.expenses),
        incomes_by_source: aggregate::incomes_by_source(&input.incomes),
        goal_progress: planning::goal_progress(&input.savings_goals, None),
        debt_payoff,
        profile,
        recommendations,
        allocation,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Personal finance profile with rule-based recommendations and allocation",
        &serde_json::json!({
            "incomes": input.incomes.len(),
            "expenses": input.expenses.len(),
            "savings_goals": input.savings_goals.len(),
            "debts": input.debts.len(),
            "currency": format!("{:?}", input.currency),
            "strict": input.strict,
        }),
        warnings,
        elapsed,
        report,
    ))
}

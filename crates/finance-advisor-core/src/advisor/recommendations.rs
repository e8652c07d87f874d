use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::debug;

use crate::format::MoneyFormat;
use crate::profile::{FinancialProfile, RiskProfile};
use crate::types::{Money, Priority};

// ---------------------------------------------------------------------------
// Rule parameters
// ---------------------------------------------------------------------------

const EMERGENCY_SHARE_OF_AVAILABLE: Decimal = dec!(0.3);
/// Target fund size in months of fixed expenses, built up over a year.
const EMERGENCY_TARGET_MONTHS: Decimal = dec!(6);
const EMERGENCY_BUILD_MONTHS: Decimal = dec!(12);
const DEBT_SHARE_OF_AVAILABLE: Decimal = dec!(0.4);
const DEBT_SHARE_OF_PAYMENTS: Decimal = dec!(0.5);
const HOUSING_SHARE_OF_AVAILABLE: Decimal = dec!(0.25);
const INVESTMENT_SHARE_OF_AVAILABLE: Decimal = dec!(0.2);
/// Variable spending above this share of fixed spending triggers optimisation.
const VARIABLE_TO_FIXED_TRIGGER: Decimal = dec!(0.5);
const OPTIMIZATION_SHARE_OF_VARIABLE: Decimal = dec!(0.2);
const LIFESTYLE_SHARE_OF_AVAILABLE: Decimal = dec!(0.15);
const LIFESTYLE_FLOOR: Money = dec!(200);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Savings,
    Debt,
    Investment,
    Emergency,
    Lifestyle,
    Optimization,
}

/// The rule that produced a recommendation. Declaration order is the rule
/// evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    EmergencyFund,
    HighInterestDebt,
    HousingSavings,
    Investment,
    ExpenseOptimization,
    Lifestyle,
}

impl RecommendationKind {
    /// Stable identifier used by callers for display keys.
    pub fn id(self) -> &'static str {
        match self {
            RecommendationKind::EmergencyFund => "emergency-fund",
            RecommendationKind::HighInterestDebt => "high-interest-debt",
            RecommendationKind::HousingSavings => "housing-savings",
            RecommendationKind::Investment => "investment",
            RecommendationKind::ExpenseOptimization => "expense-optimization",
            RecommendationKind::Lifestyle => "lifestyle",
        }
    }

    pub fn category(self) -> RecommendationCategory {
        match self {
            RecommendationKind::EmergencyFund => RecommendationCategory::Emergency,
            RecommendationKind::HighInterestDebt => RecommendationCategory::Debt,
            RecommendationKind::HousingSavings => RecommendationCategory::Savings,
            RecommendationKind::Investment => RecommendationCategory::Investment,
            RecommendationKind::ExpenseOptimization => RecommendationCategory::Optimization,
            RecommendationKind::Lifestyle => RecommendationCategory::Lifestyle,
        }
    }

    pub fn priority(self) -> Priority {
        match self {
            RecommendationKind::EmergencyFund | RecommendationKind::HighInterestDebt => {
                Priority::High
            }
            RecommendationKind::HousingSavings | RecommendationKind::Investment => {
                Priority::Medium
            }
            RecommendationKind::ExpenseOptimization | RecommendationKind::Lifestyle => {
                Priority::Low
            }
        }
    }
}

/// A single piece of advice derived from a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub category: RecommendationCategory,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_steps: Vec<String>,
}

impl Recommendation {
    fn new(
        kind: RecommendationKind,
        title: &str,
        description: String,
        suggested_amount: Money,
        timeframe: &str,
        action_steps: Vec<String>,
    ) -> Self {
        Recommendation {
            id: kind.id().to_string(),
            kind,
            title: title.to_string(),
            description,
            category: kind.category(),
            priority: kind.priority(),
            suggested_amount: Some(suggested_amount),
            timeframe: Some(timeframe.to_string()),
            action_steps,
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

type Rule = fn(&FinancialProfile, &MoneyFormat) -> Option<Recommendation>;

/// Evaluation order. Ties in priority keep this order after sorting.
const RULES: [Rule; 6] = [
    emergency_fund,
    high_interest_debt,
    housing_savings,
    investment_start,
    expense_optimization,
    lifestyle_allowance,
];

fn emergency_fund(p: &FinancialProfile, fmt: &MoneyFormat) -> Option<Recommendation> {
    if p.has_emergency_fund {
        return None;
    }

    let target = p.fixed_expenses * EMERGENCY_TARGET_MONTHS;
    let monthly = (p.available_amount * EMERGENCY_SHARE_OF_AVAILABLE)
        .min(target / EMERGENCY_BUILD_MONTHS);

    Some(Recommendation::new(
        RecommendationKind::EmergencyFund,
        "Build an Emergency Fund",
        format!(
            "Your emergency fund should cover 6 months of fixed expenses ({} × 6). \
             It protects you against surprises such as losing your job or unexpected \
             medical bills.",
            fmt.format(p.fixed_expenses)
        ),
        monthly,
        "6-12 months",
        vec![
            "Open a separate savings account used only for emergencies".to_string(),
            format!("Set up an automatic transfer of {} every month", fmt.format(monthly)),
            "Do not touch this money unless it is a real emergency".to_string(),
            "Once the fund is complete, consider investing the surplus in higher-yield instruments"
                .to_string(),
        ],
    ))
}

fn high_interest_debt(p: &FinancialProfile, _fmt: &MoneyFormat) -> Option<Recommendation> {
    if !p.has_high_interest_debt {
        return None;
    }

    let extra = (p.available_amount * DEBT_SHARE_OF_AVAILABLE)
        .min(p.monthly_debt_payments * DEBT_SHARE_OF_PAYMENTS);

    Some(Recommendation::new(
        RecommendationKind::HighInterestDebt,
        "Pay Down High-Interest Debt Faster",
        "You have debts charging more than 15% a year. Paying them off quickly is \
         equivalent to earning a guaranteed return at that rate."
            .to_string(),
        extra,
        "12-24 months",
        vec![
            "Identify the debt with the highest interest rate".to_string(),
            "Pay the minimum on every debt and put the extra towards the most expensive one"
                .to_string(),
            "Once it is paid off, roll that whole payment into the next most expensive debt"
                .to_string(),
            "Consider consolidating if you can get a lower rate".to_string(),
        ],
    ))
}

fn housing_savings(p: &FinancialProfile, _fmt: &MoneyFormat) -> Option<Recommendation> {
    let amount = p.available_amount * HOUSING_SHARE_OF_AVAILABLE;

    Some(Recommendation::new(
        RecommendationKind::HousingSavings,
        "Accelerate Savings for Your Own Home",
        "You are paying rent while saving for a home. Saving faster lets you move sooner, \
         drop the rent payment and free up more money every month."
            .to_string(),
        amount,
        "18-36 months",
        vec![
            "Work out how much you need to move in (finishes, moving costs, etc.)".to_string(),
            "Check whether you can temporarily cut variable expenses".to_string(),
            "Look for ways to earn additional income".to_string(),
            "After moving, redirect the former rent money to your other goals".to_string(),
        ],
    ))
}

fn investment_start(p: &FinancialProfile, _fmt: &MoneyFormat) -> Option<Recommendation> {
    if p.risk_profile == RiskProfile::Conservative || !p.has_emergency_fund {
        return None;
    }

    let amount = p.available_amount * INVESTMENT_SHARE_OF_AVAILABLE;

    Some(Recommendation::new(
        RecommendationKind::Investment,
        "Start Investing",
        "With your emergency fund in place it is time to grow your money. Options include \
         mutual funds, term deposits or the stock market."
            .to_string(),
        amount,
        "Long term (5+ years)",
        vec![
            "Learn about the investment options available to you".to_string(),
            "Consider mutual funds first for automatic diversification".to_string(),
            "Assess your risk tolerance".to_string(),
            "Start with small amounts while you learn".to_string(),
        ],
    ))
}

fn expense_optimization(p: &FinancialProfile, _fmt: &MoneyFormat) -> Option<Recommendation> {
    if p.variable_expenses <= p.fixed_expenses * VARIABLE_TO_FIXED_TRIGGER {
        return None;
    }

    let amount = p.variable_expenses * OPTIMIZATION_SHARE_OF_VARIABLE;

    Some(Recommendation::new(
        RecommendationKind::ExpenseOptimization,
        "Optimize Variable Expenses",
        "Your variable expenses are high compared with your fixed expenses. There is room \
         to optimize and free up money for your goals."
            .to_string(),
        amount,
        "1-3 months",
        vec![
            "Review your spending over the last 3 months".to_string(),
            "Identify unnecessary expenses or ones you can reduce".to_string(),
            "Consider cheaper alternatives (cooking vs. delivery, public transport vs. ride-hailing)"
                .to_string(),
            "Set a monthly budget for variable expenses".to_string(),
        ],
    ))
}

fn lifestyle_allowance(p: &FinancialProfile, _fmt: &MoneyFormat) -> Option<Recommendation> {
    let amount = (p.available_amount * LIFESTYLE_SHARE_OF_AVAILABLE).max(LIFESTYLE_FLOOR);

    Some(Recommendation::new(
        RecommendationKind::Lifestyle,
        "Maintain Your Quality of Life",
        "Balance matters. Set aside part of your available money for personal spending and \
         entertainment, guilt-free."
            .to_string(),
        amount,
        "Monthly",
        vec![
            "Decide which activities give you the most satisfaction".to_string(),
            "Set a monthly entertainment budget".to_string(),
            "Look for affordable alternatives for your hobbies".to_string(),
            "Remember it is a planned expense, not an impulse".to_string(),
        ],
    ))
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Recommendations for `profile`, amounts rendered with the default format.
pub fn generate_recommendations(profile: &FinancialProfile) -> Vec<Recommendation> {
    generate_recommendations_with(profile, &MoneyFormat::default())
}

/// Evaluate every rule in order, then stable-sort by descending priority.
pub fn generate_recommendations_with(
    profile: &FinancialProfile,
    fmt: &MoneyFormat,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> =
        RULES.iter().filter_map(|rule| rule(profile, fmt)).collect();

    // sort_by_key is stable
    recommendations.sort_by_key(|r| Reverse(r.priority.weight()));

    debug!(
        count = recommendations.len(),
        ids = ?recommendations.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
        "recommendations generated"
    );

    recommendations
}

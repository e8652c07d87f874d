use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finance_advisor_core::planning;

use super::advisor::load_records;

/// Arguments for goal progress and payoff timelines
#[derive(Args)]
pub struct GoalsArgs {
    /// Path to a JSON or YAML file with savings_goals and debts
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly contribution used to estimate months to each goal
    #[arg(long)]
    pub contribution: Option<Decimal>,
}

pub fn run_goals(args: GoalsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if matches!(args.contribution, Some(c) if c <= Decimal::ZERO) {
        return Err("--contribution must be positive".into());
    }

    let records = load_records(args.input.as_deref(), "goal timelines")?;
    let goals = planning::goal_progress(&records.savings_goals, args.contribution);
    let debts = planning::debt_payoff_schedule(&records.debts);

    Ok(serde_json::json!({
        "goals": goals,
        "debts": debts,
    }))
}

use clap::Args;
use serde_json::Value;

use finance_advisor_core::advisor::allocation;
use finance_advisor_core::advisor::recommendations;
use finance_advisor_core::analysis::{self, AnalysisInput};

use crate::input;

/// Arguments shared by every command that reads a record set
#[derive(Args)]
pub struct RecordsArgs {
    /// Path to a JSON or YAML file with incomes, expenses, savings_goals and debts
    #[arg(long)]
    pub input: Option<String>,
}

/// Load an `AnalysisInput` from `--input` or piped stdin.
pub fn load_records(
    path: Option<&str>,
    command: &str,
) -> Result<AnalysisInput, Box<dyn std::error::Error>> {
    let records: AnalysisInput = if let Some(path) = path {
        input::file::read_records(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err(format!("--input <file> or stdin required for {command}").into());
    };

    tracing::debug!(
        incomes = records.incomes.len(),
        expenses = records.expenses.len(),
        savings_goals = records.savings_goals.len(),
        debts = records.debts.len(),
        "records loaded"
    );
    Ok(records)
}

pub fn run_summary(args: RecordsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(args.input.as_deref(), "summary")?;
    Ok(serde_json::to_value(records.summary())?)
}

pub fn run_profile(args: RecordsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(args.input.as_deref(), "profile")?;
    Ok(serde_json::to_value(records.profile())?)
}

pub fn run_recommend(args: RecordsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(args.input.as_deref(), "recommendations")?;
    let recs = recommendations::generate_recommendations_with(
        &records.profile(),
        &records.money_format(),
    );
    Ok(serde_json::to_value(recs)?)
}

pub fn run_allocate(args: RecordsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(args.input.as_deref(), "allocation")?;
    let plan = allocation::compute_allocation(&records.profile());
    Ok(serde_json::to_value(plan)?)
}

pub fn run_analyze(args: RecordsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(args.input.as_deref(), "analysis")?;
    let result = analysis::analyze(&records)?;
    for w in &result.warnings {
        tracing::warn!("{w}");
    }
    Ok(serde_json::to_value(result)?)
}

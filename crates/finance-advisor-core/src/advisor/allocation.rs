use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::profile::FinancialProfile;
use crate::types::Money;

const EMERGENCY_SHARE: Decimal = dec!(0.4);
const DEBT_SHARE_HIGH_INTEREST: Decimal = dec!(0.3);
const DEBT_SHARE_DEFAULT: Decimal = dec!(0.15);
const SAVINGS_SHARE: Decimal = dec!(0.25);
const INVESTMENT_SHARE: Decimal = dec!(0.2);
const LIFESTYLE_SHARE: Decimal = dec!(0.15);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AllocationBucket {
    Emergency,
    DebtPayment,
    Savings,
    Investment,
    Lifestyle,
}

impl AllocationBucket {
    pub const ALL: [AllocationBucket; 5] = [
        AllocationBucket::Emergency,
        AllocationBucket::DebtPayment,
        AllocationBucket::Savings,
        AllocationBucket::Investment,
        AllocationBucket::Lifestyle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AllocationBucket::Emergency => "emergency",
            AllocationBucket::DebtPayment => "debtPayment",
            AllocationBucket::Savings => "savings",
            AllocationBucket::Investment => "investment",
            AllocationBucket::Lifestyle => "lifestyle",
        }
    }
}

/// Monthly split of the available amount across buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPlan {
    pub emergency: Money,
    pub debt_payment: Money,
    pub savings: Money,
    pub investment: Money,
    pub lifestyle: Money,
}

impl AllocationPlan {
    pub fn get(&self, bucket: AllocationBucket) -> Money {
        match bucket {
            AllocationBucket::Emergency => self.emergency,
            AllocationBucket::DebtPayment => self.debt_payment,
            AllocationBucket::Savings => self.savings,
            AllocationBucket::Investment => self.investment,
            AllocationBucket::Lifestyle => self.lifestyle,
        }
    }

    /// Buckets in fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (AllocationBucket, Money)> + '_ {
        AllocationBucket::ALL.into_iter().map(move |b| (b, self.get(b)))
    }

    pub fn total(&self) -> Money {
        self.iter().map(|(_, amount)| amount).sum()
    }
}

/// Split `available_amount` across the five buckets.
///
/// A positive shortfall is added to savings. An over-allocation (no emergency
/// fund plus high-interest debt) is left as is. Negative available amounts
/// flow through the same percentages.
pub fn compute_allocation(profile: &FinancialProfile) -> AllocationPlan {
    let available = profile.available_amount;

    let mut plan = AllocationPlan {
        emergency: if profile.has_emergency_fund {
            Decimal::ZERO
        } else {
            available * EMERGENCY_SHARE
        },
        debt_payment: if profile.has_high_interest_debt {
            available * DEBT_SHARE_HIGH_INTEREST
        } else {
            available * DEBT_SHARE_DEFAULT
        },
        savings: available * SAVINGS_SHARE,
        investment: if profile.has_emergency_fund {
            available * INVESTMENT_SHARE
        } else {
            Decimal::ZERO
        },
        lifestyle: available * LIFESTYLE_SHARE,
    };

    let residual = available - plan.total();
    if residual > Decimal::ZERO {
        plan.savings += residual;
    }

    debug!(%available, %residual, total = %plan.total(), "allocation computed");

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::RiskProfile;
    use pretty_assertions::assert_eq;

    fn profile(
        available: Money,
        has_emergency_fund: bool,
        has_high_interest_debt: bool,
    ) -> FinancialProfile {
        FinancialProfile {
            total_income: available,
            total_expenses: Decimal::ZERO,
            fixed_expenses: Decimal::ZERO,
            variable_expenses: Decimal::ZERO,
            total_debt: Decimal::ZERO,
            monthly_debt_payments: Decimal::ZERO,
            current_savings: Decimal::ZERO,
            available_amount: available,
            debt_to_income_ratio: Decimal::ZERO,
            savings_rate: Decimal::ZERO,
            risk_profile: RiskProfile::Moderate,
            has_emergency_fund,
            has_high_interest_debt,
        }
    }

    #[test]
    fn test_fund_no_debt_sums_to_available() {
        let plan = compute_allocation(&profile(dec!(1000), true, false));
        assert_eq!(
            plan,
            AllocationPlan {
                emergency: dec!(0),
                debt_payment: dec!(150),
                // 250 + 250 residual
                savings: dec!(500),
                investment: dec!(200),
                lifestyle: dec!(150),
            }
        );
        assert_eq!(plan.total(), dec!(1000));
    }

    #[test]
    fn test_no_fund_no_debt() {
        let plan = compute_allocation(&profile(dec!(2000), false, false));
        assert_eq!(plan.emergency, dec!(800));
        assert_eq!(plan.debt_payment, dec!(300));
        // 500 + 100 residual
        assert_eq!(plan.savings, dec!(600));
        assert_eq!(plan.investment, dec!(0));
        assert_eq!(plan.lifestyle, dec!(300));
        assert_eq!(plan.total(), dec!(2000));
    }

    #[test]
    fn test_fund_with_debt() {
        let plan = compute_allocation(&profile(dec!(1000), true, true));
        assert_eq!(plan.debt_payment, dec!(300));
        assert_eq!(plan.savings, dec!(350));
        assert_eq!(plan.total(), dec!(1000));
    }

    #[test]
    fn test_over_allocation_left_uncorrected() {
        let plan = compute_allocation(&profile(dec!(1000), false, true));
        assert_eq!(plan.emergency, dec!(400));
        assert_eq!(plan.debt_payment, dec!(300));
        assert_eq!(plan.savings, dec!(250));
        assert_eq!(plan.lifestyle, dec!(150));
        assert_eq!(plan.total(), dec!(1100));
    }

    #[test]
    fn test_negative_available_propagates() {
        let plan = compute_allocation(&profile(dec!(-400), true, false));
        assert_eq!(plan.debt_payment, dec!(-60));
        assert_eq!(plan.savings, dec!(-100));
        assert_eq!(plan.investment, dec!(-80));
        assert_eq!(plan.lifestyle, dec!(-60));
        // residual is negative (-100), so savings is not adjusted
        assert_eq!(plan.total(), dec!(-300));
    }

    #[test]
    fn test_zero_available() {
        let plan = compute_allocation(&profile(Decimal::ZERO, false, false));
        assert_eq!(plan.total(), Decimal::ZERO);
    }

    #[test]
    fn test_serializes_camel_case_keys() {
        let plan = compute_allocation(&profile(dec!(100), true, false));
        let json = serde_json::to_value(&plan).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for bucket in AllocationBucket::ALL {
            assert!(keys.contains(&bucket.name()), "missing {}", bucket.name());
        }
    }

    #[test]
    fn test_iter_order() {
        let plan = compute_allocation(&profile(dec!(100), true, false));
        let buckets: Vec<_> = plan.iter().map(|(b, _)| b).collect();
        assert_eq!(buckets, AllocationBucket::ALL.to_vec());
    }
}

pub mod advisor;
pub mod aggregate;
pub mod error;
pub mod format;
pub mod profile;
pub mod records;
pub mod types;
pub mod validation;

#[cfg(feature = "planning")]
pub mod planning;

#[cfg(feature = "analysis")]
pub mod analysis;

pub use advisor::allocation::{compute_allocation, AllocationBucket, AllocationPlan};
pub use advisor::recommendations::{
    generate_recommendations, generate_recommendations_with, Recommendation,
    RecommendationCategory, RecommendationKind,
};
pub use error::AdvisorError;
pub use profile::{build_profile, FinancialProfile, RiskProfile};
pub use types::*;

/// Standard result type for all finance-advisor operations
pub type AdvisorResult<T> = Result<T, AdvisorError>;

#[cfg(test)]
pub(crate) mod test_utils;

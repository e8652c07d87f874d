//! Advice derived from a [`FinancialProfile`](crate::profile::FinancialProfile):
//! prioritised recommendations and a monthly cash-allocation split.

pub mod allocation;
pub mod recommendations;

//! Membership plans.
//!
//! Each plan is one row of [`PLANS`]; the fee and the membership length are
//! looked up from the number of months, never computed.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::errors::ModelError;

/// Billing terms for a plan. `amount` is in minor currency units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub months: i32,
    pub amount: i32,
    pub duration_days: u32,
}

pub const PLANS: [Plan; 4] = [
    Plan { months: 1, amount: 1000, duration_days: 30 },
    Plan { months: 2, amount: 1500, duration_days: 60 },
    Plan { months: 3, amount: 2500, duration_days: 90 },
    Plan { months: 6, amount: 4500, duration_days: 180 },
];

impl Plan {
    /// Find the plan for `months`, failing for anything outside the table.
    pub fn from_months(months: i64) -> Result<&'static Plan, ModelError> {
        PLANS
            .iter()
            .find(|p| i64::from(p.months) == months)
            .ok_or_else(|| ModelError::Validation("Invalid plan".into()))
    }

    pub fn expiry_from(&self, join_date: NaiveDate) -> Result<NaiveDate, ModelError> {
        join_date
            .checked_add_days(Days::new(u64::from(self.duration_days)))
            .ok_or_else(|| ModelError::Validation("join_date out of range".into()))
    }
}

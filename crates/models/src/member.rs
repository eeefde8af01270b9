use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::plan::Plan;

pub const NAME_MAX_LEN: usize = 100;
pub const PHONE_MAX_LEN: usize = 15;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub join_date: Date,
    pub plan_months: i32,
    pub amount: i32,
    pub expiry_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whole days past `expiry_date`, zero while the membership still runs.
    pub fn late_days(&self, today: Date) -> i64 {
        (today - self.expiry_date).num_days().max(0)
    }

    pub fn is_expired(&self, today: Date) -> bool {
        self.expiry_date < today
    }
}

fn validate_text(field: &str, value: &str, max_len: usize) -> Result<String, errors::ModelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(errors::ModelError::Validation(format!("{field} must be at most {max_len} characters")));
    }
    Ok(trimmed.to_string())
}

/// Trimmed, non-empty name of at most [`NAME_MAX_LEN`] characters.
pub fn validate_name(name: &str) -> Result<String, errors::ModelError> {
    validate_text("name", name, NAME_MAX_LEN)
}

/// Trimmed, non-empty phone of at most [`PHONE_MAX_LEN`] characters.
pub fn validate_phone(phone: &str) -> Result<String, errors::ModelError> {
    validate_text("phone", phone, PHONE_MAX_LEN)
}

/// Insert a member, deriving `amount` and `expiry_date` from `plan`.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    phone: &str,
    plan: &Plan,
    join_date: Date,
) -> Result<Model, errors::ModelError> {
    let name = validate_name(name)?;
    let phone = validate_phone(phone)?;
    let expiry_date = plan.expiry_from(join_date)?;

    let am = ActiveModel {
        name: Set(name),
        phone: Set(phone),
        join_date: Set(join_date),
        plan_months: Set(plan.months),
        amount: Set(plan.amount),
        expiry_date: Set(expiry_date),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Date {
        Date::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn member(expiry: &str) -> Model {
        Model {
            id: 1,
            name: "A".into(),
            phone: "111".into(),
            join_date: d("2024-01-01"),
            plan_months: 1,
            amount: 1000,
            expiry_date: d(expiry),
        }
    }

    #[test]
    fn late_days_zero_until_expiry_passes() {
        let m = member("2024-01-31");
        assert_eq!(m.late_days(d("2024-01-01")), 0);
        assert_eq!(m.late_days(d("2024-01-31")), 0);
        assert!(!m.is_expired(d("2024-01-31")));
    }

    #[test]
    fn late_days_counts_days_after_expiry() {
        let m = member("2024-01-31");
        assert_eq!(m.late_days(d("2024-02-01")), 1);
        assert_eq!(m.late_days(d("2024-03-01")), 30);
        assert!(m.is_expired(d("2024-02-01")));
    }

    #[test]
    fn validators_trim_and_bound_length() {
        assert_eq!(validate_name("  Ravi Kumar ").unwrap(), "Ravi Kumar");
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(NAME_MAX_LEN + 1)).is_err());
        assert!(validate_name(&"x".repeat(NAME_MAX_LEN)).is_ok());

        assert_eq!(validate_phone("9876543210").unwrap(), "9876543210");
        assert!(validate_phone("").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }
}

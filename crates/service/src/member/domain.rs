use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use models::member::{self, Model as Member};
use models::plan::Plan;

use super::errors::MemberError;
use crate::pagination::Pagination;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// `plan_months` as sent by clients: browser forms post it as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanMonths {
    Number(i64),
    Text(String),
}

impl PlanMonths {
    fn is_blank(&self) -> bool {
        matches!(self, PlanMonths::Text(s) if s.trim().is_empty())
    }

    fn to_months(&self) -> Result<i64, MemberError> {
        match self {
            PlanMonths::Number(n) => Ok(*n),
            PlanMonths::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| MemberError::Validation("Invalid data format".into())),
        }
    }
}

/// Add-member request body. Every field is required; presence is checked in
/// [`AddMemberInput::validate`] so a missing field reads as a validation error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddMemberInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub plan_months: Option<PlanMonths>,
    pub join_date: Option<String>,
}

/// Fully validated member ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub phone: String,
    pub plan: &'static Plan,
    pub join_date: NaiveDate,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

impl AddMemberInput {
    pub fn validate(self) -> Result<NewMember, MemberError> {
        let plan_present = self.plan_months.as_ref().is_some_and(|p| !p.is_blank());
        if !(present(&self.name) && present(&self.phone) && plan_present && present(&self.join_date)) {
            return Err(MemberError::Validation("Missing required fields".into()));
        }
        let (Some(name), Some(phone), Some(plan_months), Some(join_date)) =
            (self.name, self.phone, self.plan_months, self.join_date)
        else {
            return Err(MemberError::Validation("Missing required fields".into()));
        };

        let months = plan_months.to_months()?;
        let join_date = NaiveDate::parse_from_str(join_date.trim(), DATE_FORMAT)
            .map_err(|_| MemberError::Validation("Invalid data format".into()))?;
        let plan = Plan::from_months(months)?;

        Ok(NewMember {
            name: member::validate_name(&name)?,
            phone: member::validate_phone(&phone)?,
            plan,
            join_date,
        })
    }
}

/// Edit-member request body; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMemberInput {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Validated contact changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }
}

impl UpdateMemberInput {
    pub fn validate(self) -> Result<ContactPatch, MemberError> {
        Ok(ContactPatch {
            name: self.name.as_deref().map(member::validate_name).transpose()?,
            phone: self.phone.as_deref().map(member::validate_phone).transpose()?,
        })
    }
}

/// Active/expired classification derived from `expiry_date` and today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    All,
    Active,
    Expired,
}

impl MemberStatus {
    /// Unrecognized values behave as `All`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => MemberStatus::Active,
            "expired" => MemberStatus::Expired,
            _ => MemberStatus::All,
        }
    }

    pub fn matches(&self, m: &Member, today: NaiveDate) -> bool {
        match self {
            MemberStatus::All => true,
            MemberStatus::Active => !m.is_expired(today),
            MemberStatus::Expired => m.is_expired(today),
        }
    }
}

/// Read projection of a member with its lateness at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberView {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub join_date: NaiveDate,
    pub plan: i32,
    pub amount: i32,
    pub expiry_date: NaiveDate,
    pub late_days: i64,
}

impl MemberView {
    pub fn project(m: Member, today: NaiveDate) -> Self {
        let late_days = m.late_days(today);
        Self {
            id: m.id,
            name: m.name,
            phone: m.phone,
            join_date: m.join_date,
            plan: m.plan_months,
            amount: m.amount,
            expiry_date: m.expiry_date,
            late_days,
        }
    }
}

/// Raw search parameters from the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Parsed search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Trimmed needle; empty matches everything. Case folding is left to the
    /// repository.
    pub text: String,
    pub status: MemberStatus,
    pub pagination: Pagination,
}

impl SearchParams {
    pub fn validate(self) -> Result<SearchQuery, MemberError> {
        let pagination = Pagination::parse(self.page.as_deref(), self.page_size.as_deref())?;
        Ok(SearchQuery {
            text: self.q.as_deref().unwrap_or_default().trim().to_string(),
            status: self.status.as_deref().map(MemberStatus::parse).unwrap_or_default(),
            pagination,
        })
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub results: Vec<MemberView>,
    pub current_page: u32,
    pub total_pages: u64,
    pub total_members: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCounts {
    pub total: u64,
    pub active: u64,
    pub expired: u64,
}

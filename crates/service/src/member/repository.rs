use async_trait::async_trait;
use chrono::NaiveDate;

use models::member::Model as Member;

use super::domain::{ContactPatch, MemberStatus, NewMember};
use super::errors::MemberError;

/// Repository abstraction for member persistence.
///
/// Orderings are part of the contract: `list` and `search` return newest
/// (highest id) first; `list_expired` returns the longest-expired first with
/// ties broken by id descending.
///
/// `search` matches `text` as a case-insensitive substring of name or phone.
/// Case folding follows the backend: the mock and Postgres fold Unicode,
/// SQLite's `LOWER` folds ASCII only, so there `É` and `é` stay distinct.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn insert(&self, new: &NewMember) -> Result<Member, MemberError>;
    async fn get(&self, id: i32) -> Result<Option<Member>, MemberError>;
    /// `Ok(None)` when no member has `id`.
    async fn update_contact(&self, id: i32, patch: &ContactPatch) -> Result<Option<Member>, MemberError>;
    /// `Ok(false)` when no member has `id`.
    async fn delete(&self, id: i32) -> Result<bool, MemberError>;

    async fn list(&self) -> Result<Vec<Member>, MemberError>;
    async fn list_expired(&self, today: NaiveDate) -> Result<Vec<Member>, MemberError>;
    /// Matching slice plus the total number of matches.
    async fn search(
        &self,
        text: &str,
        status: MemberStatus,
        today: NaiveDate,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Member>, u64), MemberError>;
    async fn count(&self, status: MemberStatus, today: NaiveDate) -> Result<u64, MemberError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockMemberRepository {
        inner: Mutex<Store>,
    }

    #[derive(Default)]
    struct Store {
        members: Vec<Member>, // ascending id
        last_id: i32,
    }

    impl MockMemberRepository {
        fn store(&self) -> Result<MutexGuard<'_, Store>, MemberError> {
            self.inner.lock().map_err(|_| MemberError::Repository("mock store poisoned".into()))
        }
    }

    fn matches_text(m: &Member, needle: &str) -> bool {
        needle.is_empty()
            || m.name.to_lowercase().contains(needle)
            || m.phone.to_lowercase().contains(needle)
    }

    #[async_trait]
    impl MemberRepository for MockMemberRepository {
        async fn insert(&self, new: &NewMember) -> Result<Member, MemberError> {
            let expiry_date = new.plan.expiry_from(new.join_date)?;
            let mut store = self.store()?;
            store.last_id += 1;
            let member = Member {
                id: store.last_id,
                name: new.name.clone(),
                phone: new.phone.clone(),
                join_date: new.join_date,
                plan_months: new.plan.months,
                amount: new.plan.amount,
                expiry_date,
            };
            store.members.push(member.clone());
            Ok(member)
        }

        async fn get(&self, id: i32) -> Result<Option<Member>, MemberError> {
            Ok(self.store()?.members.iter().find(|m| m.id == id).cloned())
        }

        async fn update_contact(&self, id: i32, patch: &ContactPatch) -> Result<Option<Member>, MemberError> {
            let mut store = self.store()?;
            let Some(m) = store.members.iter_mut().find(|m| m.id == id) else {
                return Ok(None);
            };
            if let Some(name) = &patch.name { m.name = name.clone(); }
            if let Some(phone) = &patch.phone { m.phone = phone.clone(); }
            Ok(Some(m.clone()))
        }

        async fn delete(&self, id: i32) -> Result<bool, MemberError> {
            let mut store = self.store()?;
            let before = store.members.len();
            store.members.retain(|m| m.id != id);
            Ok(store.members.len() != before)
        }

        async fn list(&self) -> Result<Vec<Member>, MemberError> {
            Ok(self.store()?.members.iter().rev().cloned().collect())
        }

        async fn list_expired(&self, today: NaiveDate) -> Result<Vec<Member>, MemberError> {
            let mut out: Vec<Member> = self
                .store()?
                .members
                .iter()
                .filter(|m| m.is_expired(today))
                .cloned()
                .collect();
            out.sort_by(|a, b| a.expiry_date.cmp(&b.expiry_date).then(b.id.cmp(&a.id)));
            Ok(out)
        }

        async fn search(
            &self,
            text: &str,
            status: MemberStatus,
            today: NaiveDate,
            offset: u64,
            limit: u64,
        ) -> Result<(Vec<Member>, u64), MemberError> {
            let needle = text.to_lowercase();
            let store = self.store()?;
            let matched: Vec<&Member> = store
                .members
                .iter()
                .rev()
                .filter(|m| matches_text(m, &needle) && status.matches(m, today))
                .collect();
            let total = matched.len() as u64;
            let page = matched
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect();
            Ok((page, total))
        }

        async fn count(&self, status: MemberStatus, today: NaiveDate) -> Result<u64, MemberError> {
            Ok(self.store()?.members.iter().filter(|m| status.matches(m, today)).count() as u64)
        }
    }
}

use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::member::Model as Member;

use super::domain::{
    AddMemberInput, DashboardCounts, MemberStatus, MemberView, SearchPage, SearchParams,
    UpdateMemberInput,
};
use super::errors::MemberError;
use super::repository::MemberRepository;
use crate::clock::{Clock, SystemClock};

/// Membership business service independent of web framework
pub struct MemberService<R: MemberRepository> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: MemberRepository> Clone for MemberService<R> {
    fn clone(&self) -> Self {
        Self { repo: Arc::clone(&self.repo), clock: Arc::clone(&self.clock) }
    }
}

impl<R: MemberRepository> MemberService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self { Self { repo, clock } }

    pub fn with_system_clock(repo: Arc<R>) -> Self { Self::new(repo, Arc::new(SystemClock)) }

    /// Register a new member; fee and expiry come from the plan table.
    ///
    /// # Examples
    /// ```
    /// use service::member::{MemberService, domain::{AddMemberInput, PlanMonths}};
    /// use service::member::repository::mock::MockMemberRepository;
    /// use std::sync::Arc;
    /// let svc = MemberService::with_system_clock(Arc::new(MockMemberRepository::default()));
    /// let input = AddMemberInput {
    ///     name: Some("A".into()),
    ///     phone: Some("111".into()),
    ///     plan_months: Some(PlanMonths::Number(2)),
    ///     join_date: Some("2024-01-01".into()),
    /// };
    /// let m = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(m.amount, 1500);
    /// assert_eq!(m.expiry_date.to_string(), "2024-03-01");
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: AddMemberInput) -> Result<Member, MemberError> {
        let new = input.validate()?;
        let member = self.repo.insert(&new).await?;
        info!(member_id = member.id, plan_months = member.plan_months, expiry_date = %member.expiry_date, "member_created");
        Ok(member)
    }

    /// Change name and/or phone; other fields are fixed after creation.
    #[instrument(skip(self, input), fields(member_id = id))]
    pub async fn update(&self, id: i32, input: UpdateMemberInput) -> Result<Member, MemberError> {
        // unknown id wins over a bad patch
        if self.repo.get(id).await?.is_none() {
            return Err(MemberError::NotFound);
        }
        let patch = input.validate()?;
        let member = self
            .repo
            .update_contact(id, &patch)
            .await?
            .ok_or(MemberError::NotFound)?;
        info!(member_id = id, "member_updated");
        Ok(member)
    }

    #[instrument(skip(self), fields(member_id = id))]
    pub async fn delete(&self, id: i32) -> Result<(), MemberError> {
        if !self.repo.delete(id).await? {
            return Err(MemberError::NotFound);
        }
        info!(member_id = id, "member_deleted");
        Ok(())
    }

    /// Every member, newest first.
    pub async fn list(&self) -> Result<Vec<MemberView>, MemberError> {
        let today = self.clock.today();
        let members = self.repo.list().await?;
        Ok(members.into_iter().map(|m| MemberView::project(m, today)).collect())
    }

    /// Expired members, most overdue first.
    pub async fn list_expired(&self) -> Result<Vec<MemberView>, MemberError> {
        let today = self.clock.today();
        let members = self.repo.list_expired(today).await?;
        Ok(members.into_iter().map(|m| MemberView::project(m, today)).collect())
    }

    #[instrument(skip(self, params))]
    pub async fn search(&self, params: SearchParams) -> Result<SearchPage, MemberError> {
        let query = params.validate()?;
        let today = self.clock.today();
        let p = query.pagination;
        let (rows, total) = self
            .repo
            .search(&query.text, query.status, today, p.offset(), p.limit())
            .await?;
        debug!(text = %query.text, status = ?query.status, page = p.page, total, "member_search");
        Ok(SearchPage {
            results: rows.into_iter().map(|m| MemberView::project(m, today)).collect(),
            current_page: p.page,
            total_pages: p.total_pages(total),
            total_members: total,
        })
    }

    /// `total` is the sum of the other two so the counts always agree.
    pub async fn dashboard(&self) -> Result<DashboardCounts, MemberError> {
        let today = self.clock.today();
        let active = self.repo.count(MemberStatus::Active, today).await?;
        let expired = self.repo.count(MemberStatus::Expired, today).await?;
        Ok(DashboardCounts { total: active + expired, active, expired })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::member::domain::PlanMonths;
    use crate::member::repository::mock::MockMemberRepository;
    use chrono::{Days, NaiveDate};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn svc_at(today: &str) -> MemberService<MockMemberRepository> {
        MemberService::new(Arc::new(MockMemberRepository::default()), Arc::new(FixedClock(d(today))))
    }

    fn add(name: &str, phone: &str, months: i64, join: NaiveDate) -> AddMemberInput {
        AddMemberInput {
            name: Some(name.into()),
            phone: Some(phone.into()),
            plan_months: Some(PlanMonths::Number(months)),
            join_date: Some(join.to_string()),
        }
    }

    /// Join date such that a 1-month plan expired `late` days before `today`.
    fn joined_for_lateness(today: NaiveDate, late: u64) -> NaiveDate {
        today - Days::new(30 + late)
    }

    #[tokio::test]
    async fn create_applies_plan_table() {
        let svc = svc_at("2024-01-01");
        for (months, amount, days) in [(1, 1000, 30), (2, 1500, 60), (3, 2500, 90), (6, 4500, 180)] {
            let m = svc.create(add("A", "111", months, d("2024-01-01"))).await.unwrap();
            assert_eq!(m.amount, amount);
            assert_eq!(m.expiry_date, d("2024-01-01") + Days::new(days));
        }
        for bad in [0, 4, 5, 12] {
            let err = svc.create(add("A", "111", bad, d("2024-01-01"))).await.unwrap_err();
            assert!(matches!(err, MemberError::Validation(_)));
        }
        assert_eq!(svc.list().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn two_month_plan_costs_1500_for_sixty_days() {
        let svc = svc_at("2024-01-01");
        let m = svc.create(add("A", "111", 2, d("2024-01-01"))).await.unwrap();
        assert!(m.id > 0);
        assert_eq!(m.amount, 1500);
        assert_eq!(m.expiry_date, d("2024-03-01"));
    }

    #[tokio::test]
    async fn fresh_member_is_not_late() {
        let svc = svc_at("2024-05-10");
        for months in [1, 2, 3, 6] {
            svc.create(add("A", "111", months, d("2024-05-10"))).await.unwrap();
        }
        assert!(svc.list().await.unwrap().iter().all(|v| v.late_days == 0));
        assert!(svc.list_expired().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn late_days_match_in_list_and_search() {
        let today = d("2024-06-01");
        let svc = svc_at("2024-06-01");
        let m = svc.create(add("Late", "999", 1, joined_for_lateness(today, 12))).await.unwrap();

        let listed = svc.list().await.unwrap();
        assert_eq!(listed[0].id, m.id);
        assert_eq!(listed[0].late_days, 12);

        let page = svc.search(SearchParams { q: Some("late".into()), ..Default::default() }).await.unwrap();
        assert_eq!(page.results[0].late_days, 12);
    }

    #[tokio::test]
    async fn list_expired_orders_by_lateness_then_id() {
        let today = d("2024-06-01");
        let svc = svc_at("2024-06-01");
        let a = svc.create(add("A", "1", 1, joined_for_lateness(today, 5))).await.unwrap();
        let b = svc.create(add("B", "2", 1, joined_for_lateness(today, 40))).await.unwrap();
        let c = svc.create(add("C", "3", 1, joined_for_lateness(today, 5))).await.unwrap();
        svc.create(add("D", "4", 6, today)).await.unwrap();

        let expired = svc.list_expired().await.unwrap();
        let ids: Vec<i32> = expired.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![b.id, c.id, a.id]);
        assert_eq!(expired[0].late_days, 40);
    }

    #[tokio::test]
    async fn dashboard_counts_add_up() {
        let today = d("2024-06-01");
        let svc = svc_at("2024-06-01");
        assert_eq!(svc.dashboard().await.unwrap(), DashboardCounts { total: 0, active: 0, expired: 0 });

        for late in [1, 2, 3] {
            svc.create(add("E", "1", 1, joined_for_lateness(today, late))).await.unwrap();
        }
        // expires exactly today: still active
        svc.create(add("T", "2", 1, today - Days::new(30))).await.unwrap();
        svc.create(add("F", "3", 3, today)).await.unwrap();

        let c = svc.dashboard().await.unwrap();
        assert_eq!(c.expired, 3);
        assert_eq!(c.active, 2);
        assert_eq!(c.total, c.active + c.expired);
    }

    #[tokio::test]
    async fn search_expired_example_paginates() {
        let today = d("2024-06-01");
        let svc = svc_at("2024-06-01");
        let mut expired_ids = Vec::new();
        for i in 0..15u64 {
            if i % 3 == 0 {
                svc.create(add(&format!("Active {i}"), "100", 6, today)).await.unwrap();
            } else {
                let m = svc.create(add(&format!("Expired {i}"), "200", 1, joined_for_lateness(today, i))).await.unwrap();
                expired_ids.push(m.id);
            }
        }
        assert_eq!(expired_ids.len(), 10);
        expired_ids.reverse();

        let params = |page: &str| SearchParams {
            q: Some(String::new()),
            status: Some("expired".into()),
            page: Some(page.into()),
            page_size: Some("8".into()),
        };
        let first = svc.search(params("1")).await.unwrap();
        assert_eq!(first.total_members, 10);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.current_page, 1);
        let first_ids: Vec<i32> = first.results.iter().map(|v| v.id).collect();
        assert_eq!(first_ids, expired_ids[..8]);

        let second = svc.search(params("2")).await.unwrap();
        let mut all: Vec<i32> = first_ids;
        all.extend(second.results.iter().map(|v| v.id));
        assert_eq!(all, expired_ids);

        let past_end = svc.search(params("3")).await.unwrap();
        assert!(past_end.results.is_empty());
        assert_eq!(past_end.total_members, 10);
    }

    #[tokio::test]
    async fn search_status_filters_and_defaults() {
        let today = d("2024-06-01");
        let svc = svc_at("2024-06-01");
        svc.create(add("Ravi", "9876500001", 1, joined_for_lateness(today, 3))).await.unwrap();
        svc.create(add("Anita", "9876500002", 6, today)).await.unwrap();
        svc.create(add("Ravindra", "5550003", 2, today)).await.unwrap();

        let by_status = |status: &str| SearchParams { status: Some(status.into()), ..Default::default() };
        let active = svc.search(by_status("active")).await.unwrap();
        assert!(active.results.iter().all(|v| v.expiry_date >= today));
        assert_eq!(active.total_members, 2);

        let expired = svc.search(by_status("expired")).await.unwrap();
        assert!(expired.results.iter().all(|v| v.expiry_date < today));
        assert_eq!(expired.total_members, 1);

        assert_eq!(svc.search(by_status("all")).await.unwrap().total_members, 3);
        assert_eq!(svc.search(by_status("whatever")).await.unwrap().total_members, 3);

        let q = svc.search(SearchParams { q: Some("RAVI".into()), ..Default::default() }).await.unwrap();
        assert_eq!(q.total_members, 2);
        let q = svc.search(SearchParams { q: Some("98765".into()), status: Some("active".into()), ..Default::default() }).await.unwrap();
        assert_eq!(q.total_members, 1);
        assert_eq!(q.results[0].name, "Anita");
    }

    #[tokio::test]
    async fn page_size_above_one_hundred_is_honoured() {
        let svc = svc_at("2024-06-01");
        for i in 0..120 {
            svc.create(add(&format!("M{i}"), "100", 1, d("2024-06-01"))).await.unwrap();
        }
        let page = svc
            .search(SearchParams { page_size: Some("150".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(page.total_members, 120);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.results.len(), 120);

        let page = svc
            .search(SearchParams { page: Some("2".into()), page_size: Some("110".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.results.len(), 10);
    }

    #[tokio::test]
    async fn search_on_empty_store_has_one_page() {
        let svc = svc_at("2024-06-01");
        let page = svc.search(SearchParams::default()).await.unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_members, 0);
    }

    #[tokio::test]
    async fn search_rejects_bad_pagination() {
        let svc = svc_at("2024-06-01");
        for (page, size) in [("0", "8"), ("abc", "8"), ("1", "0"), ("1", "-3")] {
            let params = SearchParams { page: Some(page.into()), page_size: Some(size.into()), ..Default::default() };
            assert!(matches!(svc.search(params).await, Err(MemberError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn update_patches_contact_fields_only() {
        let svc = svc_at("2024-01-01");
        let m = svc.create(add("A", "111", 3, d("2024-01-01"))).await.unwrap();

        let same = svc.update(m.id, UpdateMemberInput::default()).await.unwrap();
        assert_eq!(same, m);

        let renamed = svc.update(m.id, UpdateMemberInput { name: Some("B".into()), phone: None }).await.unwrap();
        assert_eq!(renamed.name, "B");
        assert_eq!(renamed.phone, "111");
        assert_eq!(renamed.expiry_date, m.expiry_date);
        assert_eq!(renamed.amount, m.amount);

        let err = svc.update(m.id + 1, UpdateMemberInput::default()).await.unwrap_err();
        assert!(matches!(err, MemberError::NotFound));
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_even_with_bad_patch() {
        let svc = svc_at("2024-01-01");
        let m = svc.create(add("A", "111", 1, d("2024-01-01"))).await.unwrap();

        let blank = UpdateMemberInput { name: Some(String::new()), phone: None };
        let err = svc.update(999, blank.clone()).await.unwrap_err();
        assert!(matches!(err, MemberError::NotFound));

        let err = svc.update(m.id, blank).await.unwrap_err();
        assert!(matches!(err, MemberError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_twice_fails_second_time() {
        let svc = svc_at("2024-01-01");
        let m = svc.create(add("A", "111", 1, d("2024-01-01"))).await.unwrap();
        svc.delete(m.id).await.unwrap();
        assert!(matches!(svc.delete(m.id).await, Err(MemberError::NotFound)));
        assert!(svc.list().await.unwrap().is_empty());
    }
}

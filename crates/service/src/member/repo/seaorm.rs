use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use models::member::{self, Model as Member};

use crate::member::domain::{ContactPatch, MemberStatus, NewMember};
use crate::member::errors::MemberError;
use crate::member::repository::MemberRepository;

pub struct SeaOrmMemberRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmMemberRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn with_status(select: Select<member::Entity>, status: MemberStatus, today: NaiveDate) -> Select<member::Entity> {
    match status {
        MemberStatus::All => select,
        MemberStatus::Active => select.filter(member::Column::ExpiryDate.gte(today)),
        MemberStatus::Expired => select.filter(member::Column::ExpiryDate.lt(today)),
    }
}

/// Escape LIKE metacharacters so user text is matched literally.
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Case-insensitive substring match on name or phone. `LOWER` is
/// Unicode-aware on Postgres but ASCII-only on SQLite, so the needle is tried
/// folded both ways.
fn with_text(select: Select<member::Entity>, text: &str) -> Select<member::Entity> {
    if text.is_empty() {
        return select;
    }
    let mut needles = vec![text.to_lowercase()];
    let ascii = text.to_ascii_lowercase();
    if ascii != needles[0] {
        needles.push(ascii);
    }

    let mut cond = Condition::any();
    for needle in needles {
        let pattern = format!("%{}%", escape_like(&needle));
        for col in [member::Column::Name, member::Column::Phone] {
            cond = cond.add(
                Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern.clone()).escape('\\')),
            );
        }
    }
    select.filter(cond)
}

#[async_trait::async_trait]
impl MemberRepository for SeaOrmMemberRepository {
    async fn insert(&self, new: &NewMember) -> Result<Member, MemberError> {
        Ok(member::create(&self.db, &new.name, &new.phone, new.plan, new.join_date).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Member>, MemberError> {
        Ok(member::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn update_contact(&self, id: i32, patch: &ContactPatch) -> Result<Option<Member>, MemberError> {
        let Some(found) = member::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(found));
        }
        let mut am: member::ActiveModel = found.into();
        if let Some(name) = &patch.name { am.name = Set(name.clone()); }
        if let Some(phone) = &patch.phone { am.phone = Set(phone.clone()); }
        Ok(Some(am.update(&self.db).await?))
    }

    async fn delete(&self, id: i32) -> Result<bool, MemberError> {
        let res = member::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self) -> Result<Vec<Member>, MemberError> {
        Ok(member::Entity::find()
            .order_by_desc(member::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn list_expired(&self, today: NaiveDate) -> Result<Vec<Member>, MemberError> {
        // earliest expiry == most late days
        Ok(with_status(member::Entity::find(), MemberStatus::Expired, today)
            .order_by_asc(member::Column::ExpiryDate)
            .order_by_desc(member::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn search(
        &self,
        text: &str,
        status: MemberStatus,
        today: NaiveDate,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Member>, u64), MemberError> {
        let select = with_status(with_text(member::Entity::find(), text), status, today);
        let total = select.clone().count(&self.db).await?;
        let rows = select
            .order_by_desc(member::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok((rows, total))
    }

    async fn count(&self, status: MemberStatus, today: NaiveDate) -> Result<u64, MemberError> {
        Ok(with_status(member::Entity::find(), status, today).count(&self.db).await?)
    }
}

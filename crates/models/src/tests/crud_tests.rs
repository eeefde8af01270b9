use crate::db::connect_in_memory;
use crate::member;
use crate::plan::Plan;
use sea_orm::{EntityTrait, ActiveModelTrait, Set, QueryFilter, ColumnTrait, QueryOrder};
use anyhow::Result;

fn d(s: &str) -> sea_orm::prelude::Date {
    sea_orm::prelude::Date::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Test member CRUD operations
#[tokio::test]
async fn test_member_crud() -> Result<()> {
    let db = connect_in_memory().await?;

    // Create
    let plan = Plan::from_months(2)?;
    let created = member::create(&db, " A ", "111", plan, d("2024-01-01")).await?;
    assert!(created.id > 0);
    assert_eq!(created.name, "A");
    assert_eq!(created.amount, 1500);
    assert_eq!(created.plan_months, 2);
    assert_eq!(created.expiry_date, d("2024-03-01"));

    // Read
    let found = member::Entity::find_by_id(created.id).one(&db).await?.expect("member exists");
    assert_eq!(found, created);

    // Update contact fields only
    let mut am: member::ActiveModel = found.into();
    am.phone = Set("222".into());
    let updated = am.update(&db).await?;
    assert_eq!(updated.phone, "222");
    assert_eq!(updated.expiry_date, created.expiry_date);

    // Delete
    let res = member::Entity::delete_by_id(created.id).exec(&db).await?;
    assert_eq!(res.rows_affected, 1);
    assert!(member::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_ids_increase_and_expiry_filter() -> Result<()> {
    let db = connect_in_memory().await?;
    let one = Plan::from_months(1)?;

    let old = member::create(&db, "Old", "100", one, d("2024-01-01")).await?;
    let new = member::create(&db, "New", "200", one, d("2024-06-01")).await?;
    assert!(new.id > old.id);

    let expired = member::Entity::find()
        .filter(member::Column::ExpiryDate.lt(d("2024-06-15")))
        .order_by_desc(member::Column::Id)
        .all(&db)
        .await?;
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].id, old.id);
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_blank_fields() -> Result<()> {
    let db = connect_in_memory().await?;
    let plan = Plan::from_months(3)?;
    assert!(member::create(&db, "", "111", plan, d("2024-01-01")).await.is_err());
    assert!(member::create(&db, "A", "  ", plan, d("2024-01-01")).await.is_err());
    assert!(member::Entity::find().all(&db).await?.is_empty());
    Ok(())
}

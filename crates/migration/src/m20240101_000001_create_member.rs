//! Create `member` table.
//!
//! `amount` and `expiry_date` are written once at creation from the plan table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .if_not_exists()
                    .col(pk_auto(Member::Id))
                    .col(string_len(Member::Name, 100).not_null())
                    .col(string_len(Member::Phone, 15).not_null())
                    .col(date(Member::JoinDate).not_null())
                    .col(integer(Member::PlanMonths).not_null())
                    .col(integer(Member::Amount).not_null())
                    .col(date(Member::ExpiryDate).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Member::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Member {
    Table,
    Id,
    Name,
    Phone,
    JoinDate,
    PlanMonths,
    Amount,
    ExpiryDate,
}

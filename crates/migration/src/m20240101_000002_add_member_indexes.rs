use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Active/expired filters and the dashboard counts compare against expiry_date
        manager
            .create_index(
                Index::create()
                    .name("idx_member_expiry_date")
                    .table(Member::Table)
                    .col(Member::ExpiryDate)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_member_phone")
                    .table(Member::Table)
                    .col(Member::Phone)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_member_phone").table(Member::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_member_expiry_date").table(Member::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Member { Table, Phone, ExpiryDate }

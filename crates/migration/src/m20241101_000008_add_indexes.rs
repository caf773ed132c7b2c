use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Orders: history lookups by user
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_user")
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .to_owned(),
            )
            .await?;

        // Orders: FK side of service
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_service")
                    .table(Orders::Table)
                    .col(Orders::ServiceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_deletion_log_order")
                    .table(OrderDeletionLog::Table)
                    .col(OrderDeletionLog::OrderId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_orders_user").table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_orders_service").table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_order_deletion_log_order").table(OrderDeletionLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Orders { Table, UserId, ServiceId }

#[derive(DeriveIden)]
enum OrderDeletionLog { Table, OrderId }

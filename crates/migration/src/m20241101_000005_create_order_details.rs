//! Create `order_details`: optional free-text note, at most one per order.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderDetails::Table)
                    .if_not_exists()
                    .col(uuid(OrderDetails::OrderId).primary_key())
                    .col(text(OrderDetails::ExtraInfo).not_null())
                    .col(timestamp_with_time_zone(OrderDetails::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_details_order")
                            .from(OrderDetails::Table, OrderDetails::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(OrderDetails::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum OrderDetails { Table, OrderId, ExtraInfo, UpdatedAt }

#[derive(DeriveIden)]
enum Orders { Table, Id }

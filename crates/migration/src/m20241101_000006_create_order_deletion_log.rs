//! Create the append-only `order_deletion_log` table and the
//! `log_order_deletion` trigger that fills it after every delete on `orders`.
//!
//! The table carries no FK: log rows outlive the order they describe.
use sea_orm_migration::{prelude::*, schema::*, sea_orm::DbBackend};

pub const TRIGGER_NAME: &str = "log_order_deletion";

const PG_FUNCTION: &str = r#"
CREATE OR REPLACE FUNCTION log_order_deletion() RETURNS TRIGGER AS $$
BEGIN
    INSERT INTO order_deletion_log (order_id) VALUES (OLD.id);
    RETURN OLD;
END;
$$ LANGUAGE plpgsql
"#;

const PG_TRIGGER: &str = r#"
CREATE TRIGGER log_order_deletion
AFTER DELETE ON orders
FOR EACH ROW EXECUTE FUNCTION log_order_deletion()
"#;

const SQLITE_TRIGGER: &str = r#"
CREATE TRIGGER log_order_deletion
AFTER DELETE ON orders
FOR EACH ROW
BEGIN
    INSERT INTO order_deletion_log (order_id) VALUES (OLD.id);
END
"#;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderDeletionLog::Table)
                    .if_not_exists()
                    .col(pk_auto(OrderDeletionLog::Id))
                    .col(uuid(OrderDeletionLog::OrderId).not_null())
                    .col(
                        date_time(OrderDeletionLog::DeletedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        let db = manager.get_connection();
        match manager.get_database_backend() {
            DbBackend::Postgres => {
                db.execute_unprepared(PG_FUNCTION).await?;
                db.execute_unprepared("DROP TRIGGER IF EXISTS log_order_deletion ON orders").await?;
                db.execute_unprepared(PG_TRIGGER).await?;
            }
            DbBackend::Sqlite => {
                db.execute_unprepared("DROP TRIGGER IF EXISTS log_order_deletion").await?;
                db.execute_unprepared(SQLITE_TRIGGER).await?;
            }
            other => {
                return Err(DbErr::Migration(format!("order deletion trigger not supported on {other:?}")));
            }
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        match manager.get_database_backend() {
            DbBackend::Postgres => {
                db.execute_unprepared("DROP TRIGGER IF EXISTS log_order_deletion ON orders").await?;
                db.execute_unprepared("DROP FUNCTION IF EXISTS log_order_deletion()").await?;
            }
            _ => {
                db.execute_unprepared("DROP TRIGGER IF EXISTS log_order_deletion").await?;
            }
        }
        manager.drop_table(Table::drop().table(OrderDeletionLog::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum OrderDeletionLog { Table, Id, OrderId, DeletedAt }

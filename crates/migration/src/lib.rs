//! Migrator registering entity migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20241101_000001_create_user;
mod m20241101_000002_create_user_credentials;
mod m20241101_000003_create_service;
mod m20241101_000004_create_orders;
mod m20241101_000005_create_order_details;
mod m20241101_000006_create_order_deletion_log;
mod m20241101_000007_seed_services;
mod m20241101_000008_add_indexes;

pub use m20241101_000006_create_order_deletion_log::TRIGGER_NAME as ORDER_DELETION_TRIGGER;
pub use m20241101_000007_seed_services::DEFAULT_CATALOG;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241101_000001_create_user::Migration),
            Box::new(m20241101_000002_create_user_credentials::Migration),
            Box::new(m20241101_000003_create_service::Migration),
            Box::new(m20241101_000004_create_orders::Migration),
            Box::new(m20241101_000005_create_order_details::Migration),
            Box::new(m20241101_000006_create_order_deletion_log::Migration),
            Box::new(m20241101_000007_seed_services::Migration),
            // Indexes should always be applied last
            Box::new(m20241101_000008_add_indexes::Migration),
        ]
    }
}

//! Seed the default service catalog. The application never writes to
//! `service`; operators extend the catalog with further migrations.
use sea_orm_migration::prelude::*;
use uuid::Uuid;

/// (name, description, price in cents)
pub const DEFAULT_CATALOG: &[(&str, &str, i64)] = &[
    ("House Cleaning", "Full interior cleaning of up to three rooms, kitchen and bathroom.", 8_000),
    ("Plumbing Repair", "Diagnosis and repair of leaks, clogs and fixtures.", 12_000),
    ("Electrical Inspection", "Safety inspection of wiring, outlets and the breaker panel.", 9_500),
    ("Lawn Care", "Mowing, edging and leaf removal for a standard yard.", 4_500),
    ("Appliance Installation", "Installation of a washer, dryer, dishwasher or oven.", 7_000),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Service::Table)
            .columns([Service::Id, Service::Name, Service::Description, Service::PriceCents]);
        for (name, description, price_cents) in DEFAULT_CATALOG {
            insert
                .values([
                    Uuid::new_v4().into(),
                    (*name).into(),
                    (*description).into(),
                    (*price_cents).into(),
                ])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }
        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let names: Vec<&str> = DEFAULT_CATALOG.iter().map(|(name, _, _)| *name).collect();
        let delete = Query::delete()
            .from_table(Service::Table)
            .and_where(Expr::col(Service::Name).is_in(names))
            .to_owned();
        manager.exec_stmt(delete).await
    }
}

#[derive(DeriveIden)]
enum Service { Table, Id, Name, Description, PriceCents }

//! Read-only access to the service catalog.

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Catalog entry as exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    /// Price with two decimals, e.g. `"49.99"`.
    pub price: String,
}

impl From<models::catalog::Model> for CatalogEntry {
    fn from(m: models::catalog::Model) -> Self {
        Self { price: common::format_cents(m.price_cents), id: m.id, name: m.name, description: m.description, price_cents: m.price_cents }
    }
}

#[derive(Clone)]
pub struct CatalogService {
    db: DatabaseConnection,
}

impl CatalogService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// All services, ordered by name.
    #[instrument(skip(self))]
    pub async fn list_services(&self) -> Result<Vec<CatalogEntry>, ServiceError> {
        let rows = models::catalog::list(&self.db).await?;
        Ok(rows.into_iter().map(CatalogEntry::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_service(&self, id: Uuid) -> Result<CatalogEntry, ServiceError> {
        Ok(models::catalog::get(&self.db, id).await?.into())
    }
}

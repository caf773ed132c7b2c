use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use models::order::HistoryRow;

use crate::errors::ServiceError;

/// Persistence for orders. Every method takes the owning user and never
/// touches another user's rows.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert the order and, when `note` is present, its details row in one
    /// transaction. Fails with `NotFound` for an unknown service.
    async fn place(&self, user_id: Uuid, service_id: Uuid, note: Option<String>) -> Result<HistoryRow, ServiceError>;
    async fn history(&self, user_id: Uuid) -> Result<Vec<HistoryRow>, ServiceError>;
    async fn get(&self, user_id: Uuid, order_id: Uuid) -> Result<Option<HistoryRow>, ServiceError>;
    /// Overwrite the note; `None` removes it. Returns `false` when the order
    /// does not exist for this user.
    async fn set_note(&self, user_id: Uuid, order_id: Uuid, note: Option<String>) -> Result<bool, ServiceError>;
    /// Remove details then order in one transaction. Returns `false` when the
    /// order does not exist for this user.
    async fn delete(&self, user_id: Uuid, order_id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmOrderRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn row(&self, user_id: Uuid, order_id: Uuid) -> Result<Option<HistoryRow>, ServiceError> {
        Ok(models::order::history(&self.db, user_id, Some(order_id)).await?.into_iter().next())
    }
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn place(&self, user_id: Uuid, service_id: Uuid, note: Option<String>) -> Result<HistoryRow, ServiceError> {
        let txn = self.db.begin().await?;
        models::catalog::get(&txn, service_id).await?;
        let order = models::order::create(&txn, user_id, service_id).await?;
        if let Some(text) = note.as_deref() {
            models::order_details::create(&txn, order.id, text).await?;
        }
        txn.commit().await?;
        self.row(user_id, order.id).await?.ok_or_else(|| ServiceError::not_found("order"))
    }

    async fn history(&self, user_id: Uuid) -> Result<Vec<HistoryRow>, ServiceError> {
        Ok(models::order::history(&self.db, user_id, None).await?)
    }

    async fn get(&self, user_id: Uuid, order_id: Uuid) -> Result<Option<HistoryRow>, ServiceError> {
        self.row(user_id, order_id).await
    }

    async fn set_note(&self, user_id: Uuid, order_id: Uuid, note: Option<String>) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        if models::order::find_owned(&txn, user_id, order_id).await?.is_none() {
            txn.rollback().await?;
            return Ok(false);
        }
        match note.as_deref() {
            Some(text) => { models::order_details::upsert(&txn, order_id, text).await?; }
            None => { models::order_details::delete(&txn, order_id).await?; }
        }
        txn.commit().await?;
        Ok(true)
    }

    async fn delete(&self, user_id: Uuid, order_id: Uuid) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        if models::order::find_owned(&txn, user_id, order_id).await?.is_none() {
            txn.rollback().await?;
            return Ok(false);
        }
        models::order_details::delete(&txn, order_id).await?;
        let removed = models::order::delete(&txn, order_id).await?;
        txn.commit().await?;
        Ok(removed)
    }
}

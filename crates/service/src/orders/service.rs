use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{normalize_note, OrderEntry, OrderHistory, PlaceOrderInput, UpdateNoteInput};
use super::repository::OrderRepository;
use crate::errors::ServiceError;

/// Order workflows on behalf of an authenticated user.
pub struct OrderService<R: OrderRepository> {
    repo: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(user_id = %user_id, service_id = %input.service_id))]
    pub async fn place_order(&self, user_id: Uuid, input: PlaceOrderInput) -> Result<OrderEntry, ServiceError> {
        let note = normalize_note(input.extra_info)?;
        let row = self.repo.place(user_id, input.service_id, note).await?;
        info!(user_id = %user_id, order_id = %row.order_id, service_id = %row.service_id, has_note = row.extra_info.is_some(), "order_placed");
        Ok(row.into())
    }

    /// Full history, oldest first, with the amount spent.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn history(&self, user_id: Uuid) -> Result<OrderHistory, ServiceError> {
        let rows = self.repo.history(user_id).await?;
        Ok(OrderHistory::new(rows.into_iter().map(OrderEntry::from).collect()))
    }

    #[instrument(skip(self), fields(user_id = %user_id, order_id = %order_id))]
    pub async fn get_order(&self, user_id: Uuid, order_id: Uuid) -> Result<OrderEntry, ServiceError> {
        self.repo
            .get(user_id, order_id)
            .await?
            .map(OrderEntry::from)
            .ok_or_else(|| ServiceError::not_found("order"))
    }

    /// Replace the note (last writer wins); a blank note removes it.
    #[instrument(skip(self, input), fields(user_id = %user_id, order_id = %order_id))]
    pub async fn update_note(&self, user_id: Uuid, order_id: Uuid, input: UpdateNoteInput) -> Result<OrderEntry, ServiceError> {
        let note = normalize_note(input.extra_info)?;
        let cleared = note.is_none();
        if !self.repo.set_note(user_id, order_id, note).await? {
            return Err(ServiceError::not_found("order"));
        }
        info!(user_id = %user_id, order_id = %order_id, cleared, "order_note_updated");
        self.get_order(user_id, order_id).await
    }

    #[instrument(skip(self), fields(user_id = %user_id, order_id = %order_id))]
    pub async fn delete_order(&self, user_id: Uuid, order_id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete(user_id, order_id).await? {
            return Err(ServiceError::not_found("order"));
        }
        info!(user_id = %user_id, order_id = %order_id, "order_deleted");
        Ok(())
    }
}

use axum::{extract::{Path, State}, http::StatusCode, Extension, Json};
use uuid::Uuid;

use service::orders::domain::{OrderEntry, OrderHistory, PlaceOrderInput, UpdateNoteInput};

use crate::{errors::JsonApiError, metrics, routes::auth::{ServerState, SessionUser}};

#[utoipa::path(
    get, path = "/api/orders", tag = "orders",
    responses(
        (status = 200, description = "History with total spent", body = crate::openapi::OrderHistoryDoc),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list(State(state): State<ServerState>, Extension(user): Extension<SessionUser>) -> Result<Json<OrderHistory>, JsonApiError> {
    Ok(Json(state.order_svc.history(user.user_id).await?))
}

#[utoipa::path(
    post, path = "/api/orders", tag = "orders",
    request_body = crate::openapi::PlaceOrderRequest,
    responses(
        (status = 201, description = "Placed", body = crate::openapi::OrderEntryDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Unknown service")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<SessionUser>,
    Json(input): Json<PlaceOrderInput>,
) -> Result<(StatusCode, Json<OrderEntry>), JsonApiError> {
    let entry = state.order_svc.place_order(user.user_id, input).await?;
    metrics::ORDERS_PLACED_TOTAL.inc();
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    get, path = "/api/orders/{id}", tag = "orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::OrderEntryDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderEntry>, JsonApiError> {
    Ok(Json(state.order_svc.get_order(user.user_id, id).await?))
}

#[utoipa::path(
    put, path = "/api/orders/{id}", tag = "orders",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = crate::openapi::UpdateNoteRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::OrderEntryDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateNoteInput>,
) -> Result<Json<OrderEntry>, JsonApiError> {
    let entry = state.order_svc.update_note(user.user_id, id, input).await?;
    metrics::ORDER_NOTES_UPDATED_TOTAL.inc();
    Ok(Json(entry))
}

#[utoipa::path(
    delete, path = "/api/orders/{id}", tag = "orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    state.order_svc.delete_order(user.user_id, id).await?;
    metrics::ORDERS_DELETED_TOTAL.inc();
    Ok(StatusCode::NO_CONTENT)
}

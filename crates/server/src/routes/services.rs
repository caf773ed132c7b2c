use axum::{extract::{Path, State}, Json};
use tracing::info;
use uuid::Uuid;

use service::catalog::CatalogEntry;

use crate::{errors::JsonApiError, routes::auth::ServerState};

#[utoipa::path(
    get, path = "/api/services", tag = "catalog",
    responses(
        (status = 200, description = "Catalog", body = [crate::openapi::CatalogEntryDoc]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CatalogEntry>>, JsonApiError> {
    let list = state.catalog_svc.list_services().await?;
    info!(count = list.len(), "list services");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/api/services/{id}", tag = "catalog",
    params(("id" = Uuid, Path, description = "Service id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::CatalogEntryDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<CatalogEntry>, JsonApiError> {
    Ok(Json(state.catalog_svc.get_service(id).await?))
}

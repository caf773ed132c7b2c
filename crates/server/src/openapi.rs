use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub name: String, pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct CatalogEntryDoc {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub price: String,
}

#[derive(ToSchema)]
pub struct PlaceOrderRequest {
    pub service_id: Uuid,
    pub extra_info: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdateNoteRequest {
    /// Empty or missing removes the note.
    pub extra_info: Option<String>,
}

#[derive(ToSchema)]
pub struct OrderEntryDoc {
    pub order_id: Uuid,
    pub service_id: Uuid,
    pub service_name: String,
    /// RFC 3339 timestamp
    pub ordered_at: String,
    pub extra_info: Option<String>,
    pub price_cents: i64,
    pub price: String,
}

#[derive(ToSchema)]
pub struct OrderHistoryDoc {
    pub orders: Vec<OrderEntryDoc>,
    pub total_spent_cents: i64,
    pub total_spent: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::services::list,
        crate::routes::services::get,
        crate::routes::orders::list,
        crate::routes::orders::create,
        crate::routes::orders::get,
        crate::routes::orders::update,
        crate::routes::orders::delete,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            CatalogEntryDoc,
            PlaceOrderRequest,
            UpdateNoteRequest,
            OrderEntryDoc,
            OrderHistoryDoc,
            crate::routes::auth::SessionUser,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "catalog"),
        (name = "orders")
    )
)]
pub struct ApiDoc;

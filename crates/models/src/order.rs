//! Orders placed by users, with the history projection joining catalog and
//! details.
use sea_orm::{entity::prelude::*, ConnectionTrait, FromQueryResult, JoinType, QueryOrder, QuerySelect, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{catalog, errors, order_details, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub ordered_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Service,
    Details,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Service => Entity::belongs_to(catalog::Entity).from(Column::ServiceId).to(catalog::Column::Id).into(),
            Relation::Details => Entity::has_one(order_details::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<catalog::Entity> for Entity {
    fn to() -> RelationDef { Relation::Service.def() }
}

impl Related<order_details::Entity> for Entity {
    fn to() -> RelationDef { Relation::Details.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// One line of a user's order history.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct HistoryRow {
    pub order_id: Uuid,
    pub service_id: Uuid,
    pub service_name: String,
    pub ordered_at: DateTimeWithTimeZone,
    pub extra_info: Option<String>,
    pub price_cents: i64,
}

pub async fn create<C: ConnectionTrait>(db: &C, user_id: Uuid, service_id: Uuid) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        service_id: Set(service_id),
        ordered_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Find an order only if it belongs to `user_id`.
pub async fn find_owned<C: ConnectionTrait>(db: &C, user_id: Uuid, order_id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(order_id)
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Orders of `user_id` joined with their service and optional note, oldest
/// first. `order_id` narrows the result to a single order.
pub async fn history<C: ConnectionTrait>(db: &C, user_id: Uuid, order_id: Option<Uuid>) -> Result<Vec<HistoryRow>, errors::ModelError> {
    let mut query = Entity::find()
        .select_only()
        .column_as(Column::Id, "order_id")
        .column_as(Column::ServiceId, "service_id")
        .column_as(catalog::Column::Name, "service_name")
        .column_as(Column::OrderedAt, "ordered_at")
        .column_as(order_details::Column::ExtraInfo, "extra_info")
        .column_as(catalog::Column::PriceCents, "price_cents")
        .join(JoinType::InnerJoin, Relation::Service.def())
        .join(JoinType::LeftJoin, Relation::Details.def())
        .filter(Column::UserId.eq(user_id));
    if let Some(id) = order_id {
        query = query.filter(Column::Id.eq(id));
    }
    query
        .order_by_asc(Column::OrderedAt)
        .order_by_asc(Column::Id)
        .into_model::<HistoryRow>()
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Delete by id; returns whether a row was removed.
pub async fn delete<C: ConnectionTrait>(db: &C, order_id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(order_id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, order};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub extra_info: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Order }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Order => Entity::belongs_to(order::Entity)
                .from(Column::OrderId)
                .to(order::Column::Id)
                .into(),
        }
    }
}

impl Related<order::Entity> for Entity {
    fn to() -> RelationDef { Relation::Order.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find<C: ConnectionTrait>(db: &C, order_id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(order_id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn create<C: ConnectionTrait>(db: &C, order_id: Uuid, extra_info: &str) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        order_id: Set(order_id),
        extra_info: Set(extra_info.to_string()),
        updated_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite the note of `order_id`, creating the row when absent.
/// No version check: the last writer wins.
pub async fn upsert<C: ConnectionTrait>(db: &C, order_id: Uuid, extra_info: &str) -> Result<Model, errors::ModelError> {
    match find(db, order_id).await? {
        Some(existing) => {
            let mut am: ActiveModel = existing.into();
            am.extra_info = Set(extra_info.to_string());
            am.updated_at = Set(Utc::now().into());
            am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
        }
        None => create(db, order_id, extra_info).await,
    }
}

pub async fn delete<C: ConnectionTrait>(db: &C, order_id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(order_id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

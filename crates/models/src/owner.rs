use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::pet;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "owner")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub address: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Pet,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Pet => Entity::has_many(pet::Entity).into() }
    }
}

impl Related<pet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Pet.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    full_name: &str,
    phone: &str,
    address: Option<&str>,
) -> Result<Model, ModelError> {
    if full_name.trim().is_empty() { return Err(ModelError::Validation("full name required".into())); }
    if phone.trim().is_empty() { return Err(ModelError::Validation("phone required".into())); }
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        full_name: Set(full_name.trim().to_string()),
        phone: Set(phone.trim().to_string()),
        address: Set(address.map(|a| a.trim().to_string())),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{medical_record, owner};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pet")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub species: String,
    pub birth_date: Option<Date>,
    pub owner_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
    MedicalRecord,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(owner::Entity)
                .from(Column::OwnerId)
                .to(owner::Column::Id)
                .into(),
            Relation::MedicalRecord => Entity::has_many(medical_record::Entity).into(),
        }
    }
}

impl Related<owner::Entity> for Entity {
    fn to() -> RelationDef { Relation::Owner.def() }
}

impl Related<medical_record::Entity> for Entity {
    fn to() -> RelationDef { Relation::MedicalRecord.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    species: &str,
    birth_date: Option<Date>,
    owner_id: Uuid,
) -> Result<Model, ModelError> {
    if name.trim().is_empty() { return Err(ModelError::Validation("name required".into())); }
    if species.trim().is_empty() { return Err(ModelError::Validation("species required".into())); }
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        species: Set(species.trim().to_string()),
        birth_date: Set(birth_date),
        owner_id: Set(owner_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

/// Ids of every pet belonging to `owner_id`.
pub async fn ids_by_owner<C: ConnectionTrait>(db: &C, owner_id: Uuid) -> Result<Vec<Uuid>, ModelError> {
    let pets = Entity::find()
        .filter(Column::OwnerId.eq(owner_id))
        .all(db)
        .await
        .map_err(ModelError::from_db)?;
    Ok(pets.into_iter().map(|p| p.id).collect())
}

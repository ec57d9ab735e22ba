use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{pet, veterinarian};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "medical_record")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub pet_id: Uuid,
    pub veterinarian_id: Uuid,
    pub date: Date,
    /// `HH:MM`, 24h clock.
    pub time: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Pet,
    Veterinarian,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Pet => Entity::belongs_to(pet::Entity)
                .from(Column::PetId)
                .to(pet::Column::Id)
                .into(),
            Relation::Veterinarian => Entity::belongs_to(veterinarian::Entity)
                .from(Column::VeterinarianId)
                .to(veterinarian::Column::Id)
                .into(),
        }
    }
}

impl Related<pet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Pet.def() }
}

impl Related<veterinarian::Entity> for Entity {
    fn to() -> RelationDef { Relation::Veterinarian.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    pet_id: Uuid,
    veterinarian_id: Uuid,
    date: Date,
    time: &str,
    description: &str,
) -> Result<Model, ModelError> {
    if description.trim().is_empty() { return Err(ModelError::Validation("description required".into())); }
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        pet_id: Set(pet_id),
        veterinarian_id: Set(veterinarian_id),
        date: Set(date),
        time: Set(time.to_string()),
        description: Set(description.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

/// Remove every record attached to one of `pet_ids`; returns rows affected.
pub async fn delete_by_pets<C: ConnectionTrait>(db: &C, pet_ids: &[Uuid]) -> Result<u64, ModelError> {
    if pet_ids.is_empty() {
        return Ok(0);
    }
    let res = Entity::delete_many()
        .filter(Column::PetId.is_in(pet_ids.iter().copied()))
        .exec(db)
        .await
        .map_err(ModelError::from_db)?;
    Ok(res.rows_affected)
}

pub async fn count_by_veterinarian<C: ConnectionTrait>(db: &C, veterinarian_id: Uuid) -> Result<u64, ModelError> {
    Entity::find()
        .filter(Column::VeterinarianId.eq(veterinarian_id))
        .count(db)
        .await
        .map_err(ModelError::from_db)
}

use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::medical_record;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "veterinarian")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    #[sea_orm(unique)]
    pub license_number: String,
    pub specialty: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { MedicalRecord }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::MedicalRecord => Entity::has_many(medical_record::Entity).into() }
    }
}

impl Related<medical_record::Entity> for Entity {
    fn to() -> RelationDef { Relation::MedicalRecord.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    full_name: &str,
    license_number: &str,
    specialty: &str,
) -> Result<Model, ModelError> {
    if license_number.trim().is_empty() { return Err(ModelError::Validation("license number required".into())); }
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        full_name: Set(full_name.trim().to_string()),
        license_number: Set(license_number.trim().to_string()),
        specialty: Set(specialty.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

pub async fn find_by_license<C: ConnectionTrait>(db: &C, license_number: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::LicenseNumber.eq(license_number.trim()))
        .one(db)
        .await
        .map_err(ModelError::from_db)
}

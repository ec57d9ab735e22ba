use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CredentialsRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct RegisterResponse { pub message: String, pub user_id: Uuid }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct LoginResponse { pub message: String, pub access_token: String, pub role: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct OwnerInputDoc { pub full_name: String, pub phone: String, pub address: Option<String> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct OwnerDoc {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PetInputDoc {
    pub name: String,
    pub species: String,
    /// `YYYY-MM-DD`
    pub birth_date: Option<String>,
    pub owner_id: Uuid,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PetDoc {
    pub id: Uuid,
    pub name: String,
    pub species: String,
    pub birth_date: Option<String>,
    pub owner_id: Uuid,
    pub owner: Option<OwnerDoc>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct VeterinarianInputDoc { pub full_name: String, pub license_number: String, pub specialty: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct VeterinarianDoc { pub id: Uuid, pub full_name: String, pub license_number: String, pub specialty: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct MedicalRecordInputDoc {
    pub pet_id: Uuid,
    pub veterinarian_id: Uuid,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, 09:00 to 17:00 on the half hour
    pub time: String,
    pub description: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct MedicalRecordDoc {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub veterinarian_id: Uuid,
    pub date: String,
    pub time: String,
    pub description: String,
    pub pet: Option<PetDoc>,
    pub veterinarian: Option<VeterinarianDoc>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::check,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::owners::list,
        crate::routes::owners::create,
        crate::routes::owners::get,
        crate::routes::owners::update,
        crate::routes::owners::delete,
        crate::routes::pets::list,
        crate::routes::pets::create,
        crate::routes::pets::get,
        crate::routes::pets::update,
        crate::routes::pets::delete,
        crate::routes::veterinarians::list,
        crate::routes::veterinarians::create,
        crate::routes::veterinarians::get,
        crate::routes::veterinarians::update,
        crate::routes::veterinarians::delete,
        crate::routes::medical_records::list,
        crate::routes::medical_records::create,
        crate::routes::medical_records::get,
        crate::routes::medical_records::update,
        crate::routes::medical_records::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CredentialsRequest,
            RegisterResponse,
            LoginResponse,
            OwnerInputDoc,
            OwnerDoc,
            PetInputDoc,
            PetDoc,
            VeterinarianInputDoc,
            VeterinarianDoc,
            MedicalRecordInputDoc,
            MedicalRecordDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "owners"),
        (name = "pets"),
        (name = "veterinarians"),
        (name = "medical-records")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for p in ["/api/check", "/api/auth/login", "/api/owners/{id}", "/api/pets", "/api/veterinarians/{id}", "/api/medical-records/{id}"] {
            assert!(paths.iter().any(|k| k.as_str() == p), "missing {p}");
        }
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}

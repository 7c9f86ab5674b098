use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::LoginRequest;
use crate::modules::classes::model::{Class, ClassDto};
use crate::modules::students::model::{Student, StudentForm};
use crate::utils::response::{ApiResponse, ListResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
    ),
    components(
        schemas(
            LoginRequest,
            ErrorResponse,
            Student,
            StudentForm,
            Class,
            ClassDto,
            ApiResponse<String>,
            ApiResponse<Student>,
            ApiResponse<Class>,
            ListResponse<Student>,
            ListResponse<Class>,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token issuance"),
        (name = "Students", description = "Student record management"),
        (name = "Classes", description = "Class record management")
    ),
    info(
        title = "Rollbook API",
        version = "0.1.0",
        description = "Student and class record-management REST API with bearer-token authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

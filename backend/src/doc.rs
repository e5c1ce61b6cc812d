//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: every account, profile, token, and probe endpoint plus
//! the shared error envelope. Swagger UI serves the document in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::profiles::{
    BasicBody, EducationBody, ExperienceBody, ProfileBody, ProfileResponse, ProjectBody, SkillBody,
};
use crate::inbound::http::tokens::{TokenRequest, TokenResponse};
use crate::inbound::http::users::{
    AuthResponse, AuthUserBody, LoginRequest, RegisterRequest, UpdateUserRequest, UserBody,
    UserResponse,
};

/// Enrich the generated document with the supported security schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "Token",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/users/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Portal backend API",
        description = "HTTP interface for account, profile, and token management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("Token" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::profiles::current_profile,
        crate::inbound::http::tokens::obtain_token,
        crate::inbound::http::tokens::verify_token,
        crate::inbound::http::tokens::refresh_token,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegisterRequest,
        LoginRequest,
        UpdateUserRequest,
        AuthUserBody,
        AuthResponse,
        UserBody,
        UserResponse,
        TokenRequest,
        TokenResponse,
        BasicBody,
        ExperienceBody,
        EducationBody,
        SkillBody,
        ProjectBody,
        ProfileBody,
        ProfileResponse,
    )),
    tags(
        (name = "users", description = "Account registration and management"),
        (name = "profiles", description = "Profile retrieval"),
        (name = "tokens", description = "Token issuance and verification"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn account_endpoints_are_registered() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/users",
            "/api/users/login",
            "/api/user",
            "/api/profile",
            "/api/tokens",
            "/api/tokens/verify",
            "/api/tokens/refresh",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing OpenAPI path {path}"
            );
        }
    }
}

//! Profile API handlers.
//!
//! ```text
//! GET /api/profile   Authorization: Token <jwt>  (or session cookie)
//! ```
//!
//! The profile endpoint resolves the acting user from a token when one is
//! presented, falling back to the session cookie established at login. A
//! request with neither resolves to no profile and returns `404`.

use actix_web::{HttpRequest, get, web};
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{
    Basic, Education, Error, Experience, IndianState, PROFILE_NOT_FOUND, Profile, ProfileGraph,
    Project, ProjectType, Skill, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::bearer_token;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Demographic block of a profile response. The alternate phone number is
/// considered private and never serialised.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BasicBody {
    pub dob: NaiveDate,
    pub phone: String,
    pub city: String,
    #[schema(value_type = String, example = "Karnataka")]
    pub state: IndianState,
    pub country: String,
    pub interest: String,
    pub website: String,
}

impl From<Basic> for BasicBody {
    fn from(basic: Basic) -> Self {
        Self {
            dob: basic.dob,
            phone: basic.phone,
            city: basic.city,
            state: basic.state,
            country: basic.country,
            interest: basic.interest,
            website: basic.website,
        }
    }
}

/// One employment entry of a profile response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ExperienceBody {
    pub designation: String,
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<Experience> for ExperienceBody {
    fn from(entry: Experience) -> Self {
        Self {
            designation: entry.designation,
            company: entry.company,
            start_date: entry.start_date,
            end_date: entry.end_date,
        }
    }
}

/// One education entry of a profile response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct EducationBody {
    pub education_level: String,
    pub branch: String,
    pub institute: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<Education> for EducationBody {
    fn from(entry: Education) -> Self {
        Self {
            education_level: entry.education_level,
            branch: entry.branch,
            institute: entry.institute,
            start_date: entry.start_date,
            end_date: entry.end_date,
        }
    }
}

/// One skill entry of a profile response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SkillBody {
    pub skill: String,
    pub last_used: NaiveDate,
}

impl From<Skill> for SkillBody {
    fn from(entry: Skill) -> Self {
        Self {
            skill: entry.skill,
            last_used: entry.last_used,
        }
    }
}

/// One project entry of a profile response. Carries the owner's username so
/// entries remain attributable when rendered standalone.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProjectBody {
    pub username: String,
    pub headline: String,
    pub description: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[schema(value_type = String, example = "Self")]
    pub ptype: ProjectType,
    pub extra_info: String,
}

impl ProjectBody {
    fn from_entry(username: &str, entry: Project) -> Self {
        Self {
            username: username.to_owned(),
            headline: entry.headline,
            description: entry.description,
            from_date: entry.from_date,
            to_date: entry.to_date,
            ptype: entry.ptype,
            extra_info: entry.extra_info,
        }
    }
}

/// Full profile representation.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProfileBody {
    pub username: String,
    pub bio: String,
    pub image: String,
    pub basic: BasicBody,
    pub experience: Vec<ExperienceBody>,
    pub education: Vec<EducationBody>,
    pub skills: Vec<SkillBody>,
    pub projects: Vec<ProjectBody>,
}

/// Envelope for profile responses.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub profile: ProfileBody,
}

impl From<(User, ProfileGraph)> for ProfileResponse {
    fn from((user, graph): (User, ProfileGraph)) -> Self {
        let username = user.username.as_str();
        let Profile { bio, image, .. } = graph.profile;
        Self {
            profile: ProfileBody {
                username: username.to_owned(),
                bio,
                image,
                basic: BasicBody::from(graph.basic),
                experience: graph.experience.into_iter().map(Into::into).collect(),
                education: graph.education.into_iter().map(Into::into).collect(),
                skills: graph.skills.into_iter().map(Into::into).collect(),
                projects: graph
                    .projects
                    .into_iter()
                    .map(|entry| ProjectBody::from_entry(username, entry))
                    .collect(),
            },
        }
    }
}

/// Resolve the acting user from the token when presented, else the session.
///
/// A presented-but-invalid token propagates its `401` rather than silently
/// downgrading to the session identity.
fn resolve_identity(
    req: &HttpRequest,
    state: &HttpState,
    session: &SessionContext,
) -> Result<Option<uuid::Uuid>, Error> {
    match bearer_token(req)? {
        Some(token) => state.accounts.verify_token(token).map(Some),
        None => session.user_id(),
    }
}

/// Fetch the acting user's full profile.
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Invalid token", body = Error),
        (status = 404, description = "No resolvable profile", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "currentProfile",
    security([])
)]
#[get("/profile")]
pub async fn current_profile(
    state: web::Data<HttpState>,
    req: HttpRequest,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = resolve_identity(&req, &state, &session)?
        .ok_or_else(|| Error::not_found(PROFILE_NOT_FOUND))?;
    let pair = state.accounts.profile_of(user_id).await?;
    Ok(web::Json(ProfileResponse::from(pair)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{test_session_middleware, test_state};
    use crate::inbound::http::users::{self, LoginRequest, RegisterRequest};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::Value;

    fn test_app(
        state: web::Data<crate::inbound::http::state::HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(test_session_middleware())
            .service(
                web::scope("/api")
                    .service(users::register)
                    .service(users::login)
                    .service(current_profile),
            )
    }

    async fn register_fixture(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> String {
        let request = actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json(&RegisterRequest {
                username: "jake".into(),
                email: "jake@jake.jake".into(),
                password: "jakejake1".into(),
            })
            .to_request();
        let response = actix_test::call_service(app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        body["user"]["token"]
            .as_str()
            .expect("token in register response")
            .to_owned()
    }

    #[actix_web::test]
    async fn profile_resolves_from_token() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let token = register_fixture(&app).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/profile")
            .insert_header(("Authorization", format!("Token {token}")))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        let profile = body.get("profile").expect("profile envelope");
        assert_eq!(profile["username"], "jake");
        assert_eq!(profile["basic"]["city"], "Bengaluru");
        assert_eq!(profile["basic"]["state"], "Karnataka");
        // The alternate phone number stays out of the representation.
        assert!(profile["basic"].get("alternate_phone").is_none());
        assert_eq!(profile["experience"].as_array().map(Vec::len), Some(1));
        assert_eq!(profile["skills"][0]["skill"], "Java");
        assert_eq!(profile["projects"][0]["username"], "jake");
        assert_eq!(profile["projects"][0]["ptype"], "Self");
    }

    #[actix_web::test]
    async fn profile_falls_back_to_session_cookie() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let _ = register_fixture(&app).await;

        let login = actix_test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(&LoginRequest {
                email: "jake@jake.jake".into(),
                password: "jakejake1".into(),
            })
            .to_request();
        let login_res = actix_test::call_service(&app, login).await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();

        let request = actix_test::TestRequest::get()
            .uri("/api/profile")
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["profile"]["username"], "jake");
    }

    #[actix_web::test]
    async fn anonymous_request_is_not_found() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let _ = register_fixture(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/profile")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some(PROFILE_NOT_FOUND)
        );
    }

    #[actix_web::test]
    async fn invalid_token_is_unauthorised_not_downgraded() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let _ = register_fixture(&app).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/profile")
            .insert_header(("Authorization", "Token not.a.jwt"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

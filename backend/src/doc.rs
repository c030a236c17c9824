//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (users, schedules,
//!   availabilities, comments, health)
//! - **Schemas**: Request and response bodies exposed by those endpoints
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{
    CandidatePayload, GetScheduleDetailsResponse, GetScheduleForEditResponse, RosterEntryPayload,
    SchedulePayload, UpdateAvailabilityResponse, UpdateCommentResponse,
};
use crate::domain::{Error, ErrorCode, User};
use crate::inbound::http::availabilities::AvailabilityFormBody;
use crate::inbound::http::comments::CommentFormBody;
use crate::inbound::http::schedules::ScheduleFormBody;
use crate::inbound::http::users::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Group scheduling backend API",
        description = "HTTP interface for schedules, per-candidate availability, and comments."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::schedules::new_schedule,
        crate::inbound::http::schedules::create_schedule,
        crate::inbound::http::schedules::get_schedule,
        crate::inbound::http::schedules::get_schedule_for_edit,
        crate::inbound::http::schedules::mutate_schedule,
        crate::inbound::http::availabilities::update_availability,
        crate::inbound::http::comments::update_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Error,
        ErrorCode,
        LoginRequest,
        ScheduleFormBody,
        AvailabilityFormBody,
        CommentFormBody,
        SchedulePayload,
        CandidatePayload,
        RosterEntryPayload,
        GetScheduleDetailsResponse,
        GetScheduleForEditResponse,
        UpdateAvailabilityResponse,
        UpdateCommentResponse,
    )),
    tags(
        (name = "users", description = "Login and logout"),
        (name = "schedules", description = "Schedule creation, viewing, editing, and deletion"),
        (name = "availabilities", description = "Per-candidate attendance updates"),
        (name = "comments", description = "Per-user schedule comments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

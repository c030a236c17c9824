//! Availability HTTP handlers.
//!
//! ```text
//! POST /schedules/{scheduleId}/users/{userId}/candidates/{candidateId}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{UpdateAvailabilityRequest, UpdateAvailabilityResponse};
use crate::domain::{Attendance, Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form body for the availability upsert.
///
/// The field is optional: a missing or unparsable value records "absent".
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AvailabilityFormBody {
    #[schema(example = "2")]
    pub availability: Option<String>,
}

/// Record one user's answer for one candidate.
#[utoipa::path(
    post,
    path = "/schedules/{scheduleId}/users/{userId}/candidates/{candidateId}",
    params(
        ("scheduleId" = Uuid, Path, description = "Schedule identifier"),
        ("userId" = Uuid, Path, description = "Responding user"),
        ("candidateId" = i32, Path, description = "Candidate identifier")
    ),
    request_body(content = AvailabilityFormBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Answer recorded", body = UpdateAvailabilityResponse),
        (status = 400, description = "Attendance outside 0..=2", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["availabilities"],
    operation_id = "updateAvailability",
    security(("SessionCookie" = []))
)]
#[post("/schedules/{schedule_id}/users/{user_id}/candidates/{candidate_id}")]
pub async fn update_availability(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(Uuid, Uuid, i32)>,
    form: web::Form<AvailabilityFormBody>,
) -> ApiResult<web::Json<UpdateAvailabilityResponse>> {
    session.require_user()?;
    let (schedule_id, user_id, candidate_id) = path.into_inner();

    let attendance = Attendance::from_form_value(form.availability.as_deref()).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "availability",
            "code": "attendance_out_of_range",
        }))
    })?;

    let response = state
        .availabilities
        .update_availability(UpdateAvailabilityRequest {
            schedule_id,
            user_id: UserId::from_uuid(user_id),
            candidate_id,
            attendance,
        })
        .await?;
    Ok(web::Json(response))
}

//! Comment HTTP handlers.
//!
//! ```text
//! POST /schedules/{scheduleId}/users/{userId}/comments
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::{UpdateCommentRequest, UpdateCommentResponse};
use crate::domain::UserId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form body for the comment upsert.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CommentFormBody {
    #[serde(default)]
    #[schema(example = "works for me")]
    pub comment: String,
}

/// Set one user's comment on a schedule.
#[utoipa::path(
    post,
    path = "/schedules/{scheduleId}/users/{userId}/comments",
    params(
        ("scheduleId" = Uuid, Path, description = "Schedule identifier"),
        ("userId" = Uuid, Path, description = "Commenting user")
    ),
    request_body(content = CommentFormBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Comment recorded", body = UpdateCommentResponse),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["comments"],
    operation_id = "updateComment",
    security(("SessionCookie" = []))
)]
#[post("/schedules/{schedule_id}/users/{user_id}/comments")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(Uuid, Uuid)>,
    form: web::Form<CommentFormBody>,
) -> ApiResult<web::Json<UpdateCommentResponse>> {
    session.require_user()?;
    let (schedule_id, user_id) = path.into_inner();

    let response = state
        .comments
        .update_comment(UpdateCommentRequest {
            schedule_id,
            user_id: UserId::from_uuid(user_id),
            comment: form.into_inner().comment,
        })
        .await?;
    Ok(web::Json(response))
}

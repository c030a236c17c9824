//! Schedule HTTP handlers.
//!
//! ```text
//! GET  /schedules/new
//! POST /schedules
//! GET  /schedules/{scheduleId}
//! GET  /schedules/{scheduleId}/edit
//! POST /schedules/{scheduleId}?edit=1|delete=1
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::{
    CreateScheduleRequest, DeleteScheduleRequest, GetScheduleDetailsRequest,
    GetScheduleDetailsResponse, GetScheduleForEditRequest, GetScheduleForEditResponse,
    UpdateScheduleRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form body shared by schedule creation and editing.
///
/// All fields default to empty so a sparse submission still goes through
/// the name and candidate coercion rules instead of failing to parse.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFormBody {
    #[serde(default)]
    #[schema(example = "team lunch")]
    pub schedule_name: String,
    #[serde(default)]
    #[schema(example = "somewhere cheap")]
    pub memo: String,
    /// Newline-separated candidate names.
    #[serde(default)]
    #[schema(example = "mon\ntue")]
    pub candidates: String,
}

/// Query flags selecting the operation of `POST /schedules/{scheduleId}`.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleMutationFlags {
    pub edit: Option<String>,
    pub delete: Option<String>,
}

fn redirect_to(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Fetch a blank form payload for a new schedule.
#[utoipa::path(
    get,
    path = "/schedules/new",
    responses(
        (status = 200, description = "Blank schedule form", body = ScheduleFormBody),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["schedules"],
    operation_id = "newSchedule",
    security(("SessionCookie" = []))
)]
#[get("/schedules/new")]
pub async fn new_schedule(session: SessionContext) -> ApiResult<web::Json<ScheduleFormBody>> {
    session.require_user()?;
    Ok(web::Json(ScheduleFormBody::default()))
}

/// Create a schedule with its initial candidates.
#[utoipa::path(
    post,
    path = "/schedules",
    request_body(content = ScheduleFormBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirect to the new schedule",
            headers(("Location" = String, description = "Path of the new schedule"))),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["schedules"],
    operation_id = "createSchedule",
    security(("SessionCookie" = []))
)]
#[post("/schedules")]
pub async fn create_schedule(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<ScheduleFormBody>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user()?;
    let form = form.into_inner();

    let response = state
        .schedule_commands
        .create_schedule(CreateScheduleRequest {
            created_by: user.id,
            name: form.schedule_name,
            memo: form.memo,
            candidates: form.candidates,
        })
        .await?;

    Ok(redirect_to(format!("/schedules/{}", response.schedule_id)))
}

/// Fetch the aggregated view of one schedule.
#[utoipa::path(
    get,
    path = "/schedules/{scheduleId}",
    params(("scheduleId" = Uuid, Path, description = "Schedule identifier")),
    responses(
        (status = 200, description = "Aggregated schedule view", body = GetScheduleDetailsResponse),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["schedules"],
    operation_id = "getSchedule",
    security(("SessionCookie" = []))
)]
#[get("/schedules/{schedule_id}")]
pub async fn get_schedule(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<GetScheduleDetailsResponse>> {
    let viewer = session.require_user()?;
    let response = state
        .schedule_queries
        .get_schedule_details(GetScheduleDetailsRequest {
            schedule_id: path.into_inner(),
            viewer,
        })
        .await?;
    Ok(web::Json(response))
}

/// Fetch a schedule for editing. Creator only.
#[utoipa::path(
    get,
    path = "/schedules/{scheduleId}/edit",
    params(("scheduleId" = Uuid, Path, description = "Schedule identifier")),
    responses(
        (status = 200, description = "Editable schedule projection", body = GetScheduleForEditResponse),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Not found or not the creator", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["schedules"],
    operation_id = "getScheduleForEdit",
    security(("SessionCookie" = []))
)]
#[get("/schedules/{schedule_id}/edit")]
pub async fn get_schedule_for_edit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<GetScheduleForEditResponse>> {
    let user = session.require_user()?;
    let response = state
        .schedule_queries
        .get_schedule_for_edit(GetScheduleForEditRequest {
            schedule_id: path.into_inner(),
            user_id: user.id,
        })
        .await?;
    Ok(web::Json(response))
}

/// Update or delete a schedule, selected by query flag. Creator only.
///
/// The ownership check runs before flag validation, so a non-creator
/// probing with a bad flag sees the same 404 as for any other request.
#[utoipa::path(
    post,
    path = "/schedules/{scheduleId}",
    params(
        ("scheduleId" = Uuid, Path, description = "Schedule identifier"),
        ("edit" = Option<String>, Query, description = "Set to 1 to update the schedule"),
        ("delete" = Option<String>, Query, description = "Set to 1 to delete the schedule")
    ),
    request_body(content = ScheduleFormBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirect after the mutation",
            headers(("Location" = String, description = "Follow-up path"))),
        (status = 400, description = "Missing or invalid flag", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Not found or not the creator", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["schedules"],
    operation_id = "mutateSchedule",
    security(("SessionCookie" = []))
)]
#[post("/schedules/{schedule_id}")]
pub async fn mutate_schedule(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    flags: web::Query<ScheduleMutationFlags>,
    form: web::Form<ScheduleFormBody>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user()?;
    let schedule_id = path.into_inner();
    let form = form.into_inner();

    if flags.edit.as_deref() == Some("1") {
        let response = state
            .schedule_commands
            .update_schedule(UpdateScheduleRequest {
                schedule_id,
                user_id: user.id,
                name: form.schedule_name,
                memo: form.memo,
                candidates: form.candidates,
            })
            .await?;
        return Ok(redirect_to(format!("/schedules/{}", response.schedule_id)));
    }

    if flags.delete.as_deref() == Some("1") {
        state
            .schedule_commands
            .delete_schedule(DeleteScheduleRequest {
                schedule_id,
                user_id: user.id,
            })
            .await?;
        return Ok(redirect_to("/".to_owned()));
    }

    // Ownership first: only the creator learns the flag was wrong.
    state
        .schedule_queries
        .get_schedule_for_edit(GetScheduleForEditRequest {
            schedule_id,
            user_id: user.id,
        })
        .await?;
    Err(
        Error::invalid_request("expected query flag edit=1 or delete=1").with_details(json!({
            "field": "query",
            "code": "missing_mutation_flag",
        })),
    )
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware, test_state};
    use crate::inbound::http::users::login;

    fn test_app(
        state: HttpState,
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
            .wrap(test_session_middleware())
            .app_data(web::Data::new(state))
            .service(login)
            .service(new_schedule)
            .service(create_schedule)
            .service(get_schedule_for_edit)
            .service(get_schedule)
            .service(mutate_schedule)
    }

    async fn login_as(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        username: &str,
    ) -> Cookie<'static> {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(serde_json::json!({ "username": username }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        session_cookie(&response)
    }

    async fn create_sample(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        cookie: &Cookie<'static>,
    ) -> String {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/schedules")
                .cookie(cookie.clone())
                .set_form(ScheduleFormBody {
                    schedule_name: "team lunch".to_owned(),
                    memo: "somewhere cheap".to_owned(),
                    candidates: "mon\ntue".to_owned(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        response
            .headers()
            .get(header::LOCATION)
            .expect("location header")
            .to_str()
            .expect("utf-8 location")
            .to_owned()
    }

    #[rstest]
    #[actix_web::test]
    async fn new_schedule_form_is_blank() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let cookie = login_as(&app, "alice").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/schedules/new")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json body");
        assert_eq!(body.get("scheduleName").and_then(Value::as_str), Some(""));
        assert_eq!(body.get("candidates").and_then(Value::as_str), Some(""));
    }

    #[rstest]
    #[actix_web::test]
    async fn unauthenticated_creation_is_rejected() {
        let app = actix_test::init_service(test_app(test_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/schedules")
                .set_form(ScheduleFormBody::default())
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn creation_redirects_to_the_new_schedule() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let cookie = login_as(&app, "alice").await;

        let location = create_sample(&app, &cookie).await;
        assert!(location.starts_with("/schedules/"));

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&location)
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json body");
        assert_eq!(
            body.pointer("/schedule/name").and_then(Value::as_str),
            Some("team lunch")
        );
        assert_eq!(
            body.get("candidates")
                .and_then(Value::as_array)
                .map(Vec::len),
            Some(2)
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn view_fills_the_matrix_with_defaults() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let cookie = login_as(&app, "alice").await;
        let location = create_sample(&app, &cookie).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&location)
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json body");

        let users = body.get("users").and_then(Value::as_array).expect("roster");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].get("isSelf"), Some(&Value::Bool(true)));

        let viewer_id = users[0]
            .pointer("/user/id")
            .and_then(Value::as_str)
            .expect("viewer id");
        let row = body
            .pointer(&format!("/availabilities/{viewer_id}"))
            .and_then(Value::as_object)
            .expect("viewer row");
        assert_eq!(row.len(), 2);
        assert!(row.values().all(|value| value == &Value::from(0)));
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_schedules_report_not_found() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let cookie = login_as(&app, "alice").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/schedules/{}", Uuid::new_v4()))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn edit_flag_updates_and_redirects() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let cookie = login_as(&app, "alice").await;
        let location = create_sample(&app, &cookie).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("{location}?edit=1"))
                .cookie(cookie.clone())
                .set_form(ScheduleFormBody {
                    schedule_name: "team dinner".to_owned(),
                    memo: String::new(),
                    candidates: "wed".to_owned(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&location)
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json body");
        assert_eq!(
            body.pointer("/schedule/name").and_then(Value::as_str),
            Some("team dinner")
        );
        assert_eq!(
            body.get("candidates")
                .and_then(Value::as_array)
                .map(Vec::len),
            Some(3)
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_flag_removes_the_schedule() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let cookie = login_as(&app, "alice").await;
        let location = create_sample(&app, &cookie).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("{location}?delete=1"))
                .cookie(cookie.clone())
                .set_form(ScheduleFormBody::default())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/")
        );

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&location)
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_flag_is_a_bad_request_for_the_creator() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let cookie = login_as(&app, "alice").await;
        let location = create_sample(&app, &cookie).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&location)
                .cookie(cookie)
                .set_form(ScheduleFormBody::default())
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn non_creator_sees_not_found_even_with_a_bad_flag() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let creator_cookie = login_as(&app, "alice").await;
        let location = create_sample(&app, &creator_cookie).await;
        let intruder_cookie = login_as(&app, "bob").await;

        // 404 must win over 400 so existence is not leaked.
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&location)
                .cookie(intruder_cookie.clone())
                .set_form(ScheduleFormBody::default())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("{location}?edit=1"))
                .cookie(intruder_cookie)
                .set_form(ScheduleFormBody::default())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn edit_projection_is_denied_to_non_creators() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let creator_cookie = login_as(&app, "alice").await;
        let location = create_sample(&app, &creator_cookie).await;
        let intruder_cookie = login_as(&app, "bob").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("{location}/edit"))
                .cookie(creator_cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("{location}/edit"))
                .cookie(intruder_cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

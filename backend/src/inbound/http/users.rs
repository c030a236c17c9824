//! Login and logout handlers.
//!
//! ```text
//! POST /login {"username":"alice"}
//! POST /logout
//! ```
//!
//! Identity is deliberately lightweight: a login names a user and receives
//! a session cookie. Logging in again under an existing session keeps the
//! same user id and refreshes the stored username.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, User, UserId, UserValidationError, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "alice")]
    pub username: String,
}

fn map_username_error(err: UserValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "username", "code": "invalid_username" }))
}

/// Establish a session for the named user.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let username = Username::new(payload.into_inner().username).map_err(map_username_error)?;

    // Keep a stable id across re-logins in the same session.
    let id = session
        .current_user()?
        .map_or_else(UserId::random, |user| user.id);
    let user = User::new(id, username);

    state.users.save(&user).await?;
    session.persist_user(&user)?;
    tracing::info!(user_id = %user.id, "user logged in");
    Ok(web::Json(user))
}

/// Drop the current session.
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

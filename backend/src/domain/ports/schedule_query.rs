//! Driving port for schedule read operations.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, User, UserId};

/// Serializable schedule projection for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    pub schedule_id: Uuid,
    pub name: String,
    pub memo: String,
    #[schema(value_type = String)]
    pub created_by: UserId,
    pub updated_at: DateTime<Utc>,
}

/// Serializable candidate projection for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePayload {
    pub candidate_id: i32,
    pub candidate_name: String,
}

/// One row of the respondent roster.
///
/// The viewer always appears first with `is_self` set, followed by every
/// other user who has answered at least once, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntryPayload {
    pub user: User,
    pub is_self: bool,
}

/// Request to fetch the aggregated view of one schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetScheduleDetailsRequest {
    pub schedule_id: Uuid,
    pub viewer: User,
}

/// Aggregated view of one schedule.
///
/// `availabilities` maps user id to a complete per-candidate row: every
/// (user, candidate) cell is present, defaulting to 0 where no answer was
/// recorded. `comments` maps user id to that user's single comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetScheduleDetailsResponse {
    pub schedule: SchedulePayload,
    pub candidates: Vec<CandidatePayload>,
    pub users: Vec<RosterEntryPayload>,
    #[schema(value_type = Object)]
    pub availabilities: BTreeMap<String, BTreeMap<i32, i16>>,
    #[schema(value_type = Object)]
    pub comments: BTreeMap<String, String>,
}

/// Request to fetch a schedule for editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetScheduleForEditRequest {
    pub schedule_id: Uuid,
    pub user_id: UserId,
}

/// Editable projection of one schedule, returned to its creator only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetScheduleForEditResponse {
    pub schedule: SchedulePayload,
    pub candidates: Vec<CandidatePayload>,
}

/// Driving port for schedule read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleQuery: Send + Sync {
    /// Fetches the aggregated view of one schedule: candidates, roster,
    /// the full availability matrix and per-user comments.
    async fn get_schedule_details(
        &self,
        request: GetScheduleDetailsRequest,
    ) -> Result<GetScheduleDetailsResponse, Error>;

    /// Fetches a schedule for editing.
    ///
    /// Returns `not_found` when the schedule does not exist or the
    /// requester is not its creator.
    async fn get_schedule_for_edit(
        &self,
        request: GetScheduleForEditRequest,
    ) -> Result<GetScheduleForEditResponse, Error>;
}

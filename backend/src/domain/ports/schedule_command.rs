//! Driving port for schedule mutations.
//!
//! Inbound adapters use this port to create, edit and delete schedules
//! without depending on repository details.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, UserId};

/// Request to create a schedule from raw form input.
///
/// `candidates` is the newline-separated block exactly as submitted; the
/// domain handles trimming and blank-line filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub created_by: UserId,
    pub name: String,
    pub memo: String,
    pub candidates: String,
}

/// Response from creating a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleResponse {
    pub schedule_id: Uuid,
}

/// Request to update a schedule's name and memo and append candidates.
///
/// Existing candidates are never modified or removed; `candidates` only
/// contributes new rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    pub schedule_id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub memo: String,
    pub candidates: String,
}

/// Response from updating a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleResponse {
    pub schedule_id: Uuid,
}

/// Request to delete a schedule and everything hanging off it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteScheduleRequest {
    pub schedule_id: Uuid,
    pub user_id: UserId,
}

/// Driving port for schedule write operations.
///
/// Update and delete are creator-only: a requester who is not the creator
/// receives `not_found`, indistinguishable from a missing schedule.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleCommand: Send + Sync {
    /// Creates a schedule with its initial candidates and returns the new
    /// identifier.
    async fn create_schedule(
        &self,
        request: CreateScheduleRequest,
    ) -> Result<CreateScheduleResponse, Error>;

    /// Updates name and memo and appends any new candidates.
    async fn update_schedule(
        &self,
        request: UpdateScheduleRequest,
    ) -> Result<UpdateScheduleResponse, Error>;

    /// Deletes the schedule together with its candidates, availabilities
    /// and comments.
    async fn delete_schedule(&self, request: DeleteScheduleRequest) -> Result<(), Error>;
}

//! Driving port for availability mutations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Attendance, Error, UserId};

/// Request to record one user's answer for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityRequest {
    pub schedule_id: Uuid,
    pub user_id: UserId,
    pub candidate_id: i32,
    pub attendance: Attendance,
}

/// Response echoing the stored answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityResponse {
    #[schema(example = "OK")]
    pub status: String,
    #[schema(example = 2)]
    pub availability: i16,
}

/// Driving port for availability write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityCommand: Send + Sync {
    /// Records the answer, replacing any previous one for the same
    /// (candidate, user) pair.
    async fn update_availability(
        &self,
        request: UpdateAvailabilityRequest,
    ) -> Result<UpdateAvailabilityResponse, Error>;
}

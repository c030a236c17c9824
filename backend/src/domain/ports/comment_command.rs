//! Driving port for comment mutations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, UserId};

/// Request to set one user's comment on a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub schedule_id: Uuid,
    pub user_id: UserId,
    pub comment: String,
}

/// Response echoing the stored comment text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentResponse {
    #[schema(example = "works for me")]
    pub comment: String,
}

/// Driving port for comment write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    /// Sets the comment, replacing any previous one by the same user on
    /// the same schedule. Oversize text is truncated, not rejected.
    async fn update_comment(
        &self,
        request: UpdateCommentRequest,
    ) -> Result<UpdateCommentResponse, Error>;
}

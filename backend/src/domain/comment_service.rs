//! Comment command service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CommentCommand, CommentRepository, UpdateCommentRequest, UpdateCommentResponse,
};
use crate::domain::{Comment, CommentText, Error};

/// Implements [`CommentCommand`] on top of the repository.
pub struct CommentService<M> {
    comments: Arc<M>,
}

impl<M> CommentService<M>
where
    M: CommentRepository,
{
    pub fn new(comments: Arc<M>) -> Self {
        Self { comments }
    }
}

#[async_trait]
impl<M> CommentCommand for CommentService<M>
where
    M: CommentRepository,
{
    async fn update_comment(
        &self,
        request: UpdateCommentRequest,
    ) -> Result<UpdateCommentResponse, Error> {
        let comment = Comment {
            schedule_id: request.schedule_id,
            user_id: request.user_id,
            text: CommentText::coerce(&request.comment),
        };
        self.comments.upsert(&comment).await?;
        tracing::debug!(schedule_id = %comment.schedule_id, "comment recorded");

        Ok(UpdateCommentResponse {
            comment: comment.text.into(),
        })
    }
}

//! Driven port for comment persistence.
//!
//! A user keeps at most one comment per schedule, so writes are upserts on
//! the (schedule, user) pair.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Error, UserId};

/// Failure raised by a [`CommentRepository`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentRepositoryError {
    #[error("comment repository connection failed: {message}")]
    Connection { message: String },
    #[error("comment repository query failed: {message}")]
    Query { message: String },
}

impl CommentRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<CommentRepositoryError> for Error {
    fn from(err: CommentRepositoryError) -> Self {
        match err {
            CommentRepositoryError::Connection { message } => Self::service_unavailable(message),
            CommentRepositoryError::Query { message } => Self::internal(message),
        }
    }
}

/// Storage abstraction for comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert the comment, or replace the stored one for the same
    /// (schedule, user) pair.
    async fn upsert(&self, comment: &Comment) -> Result<(), CommentRepositoryError>;

    /// List every comment on a schedule.
    async fn list_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Remove every comment on a schedule, returning the removed count.
    async fn delete_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<u64, CommentRepositoryError>;
}

/// In-memory [`CommentRepository`] used in tests and when no database is
/// configured.
#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    rows: Mutex<HashMap<(Uuid, UserId), Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<(Uuid, UserId), Comment>>, CommentRepositoryError>
    {
        self.rows
            .lock()
            .map_err(|_| CommentRepositoryError::query("comment store lock poisoned"))
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn upsert(&self, comment: &Comment) -> Result<(), CommentRepositoryError> {
        self.rows()?
            .insert((comment.schedule_id, comment.user_id), comment.clone());
        Ok(())
    }

    async fn list_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let rows = self.rows()?;
        let mut comments: Vec<Comment> = rows
            .values()
            .filter(|row| &row.schedule_id == schedule_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.user_id.to_string().cmp(&b.user_id.to_string()));
        Ok(comments)
    }

    async fn delete_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<u64, CommentRepositoryError> {
        let mut rows = self.rows()?;
        let before = rows.len();
        rows.retain(|_, row| &row.schedule_id != schedule_id);
        Ok((before - rows.len()) as u64)
    }
}

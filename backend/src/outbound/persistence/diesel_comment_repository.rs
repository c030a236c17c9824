//! PostgreSQL-backed `CommentRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, CommentText, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CommentRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::comments;

/// Diesel-backed implementation of the comment repository port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CommentRepositoryError {
    map_pool_error(error, CommentRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CommentRepositoryError {
    map_diesel_error(
        error,
        CommentRepositoryError::query,
        CommentRepositoryError::connection,
    )
}

fn row_to_comment(row: CommentRow) -> Comment {
    Comment {
        schedule_id: row.schedule_id,
        user_id: UserId::from_uuid(row.user_id),
        text: CommentText::coerce(row.comment),
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn upsert(&self, comment: &Comment) -> Result<(), CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewCommentRow {
            schedule_id: comment.schedule_id,
            user_id: *comment.user_id.as_uuid(),
            comment: comment.text.as_ref(),
        };

        diesel::insert_into(comments::table)
            .values(&new_row)
            .on_conflict((comments::schedule_id, comments::user_id))
            .do_update()
            .set(comments::comment.eq(new_row.comment))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<CommentRow> = comments::table
            .filter(comments::schedule_id.eq(schedule_id))
            .order(comments::user_id.asc())
            .select(CommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(row_to_comment).collect())
    }

    async fn delete_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<u64, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let removed = diesel::delete(comments::table.filter(comments::schedule_id.eq(schedule_id)))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(removed as u64)
    }
}

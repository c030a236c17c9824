//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{availabilities, candidates, comments, schedules, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
}

/// Changeset struct for refreshing a username on re-login.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
}

/// Row struct for reading from the schedules table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schedules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ScheduleRow {
    pub schedule_id: Uuid,
    pub schedule_name: String,
    pub memo: String,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new schedule records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schedules)]
pub(crate) struct NewScheduleRow<'a> {
    pub schedule_id: Uuid,
    pub schedule_name: &'a str,
    pub memo: &'a str,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating existing schedule records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schedules)]
pub(crate) struct ScheduleUpdate<'a> {
    pub schedule_name: &'a str,
    pub memo: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the candidates table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = candidates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CandidateRow {
    pub candidate_id: i32,
    pub candidate_name: String,
    pub schedule_id: Uuid,
}

/// Insertable struct for creating new candidate records.
///
/// `candidate_id` is omitted: the database assigns it from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = candidates)]
pub(crate) struct NewCandidateRow<'a> {
    pub candidate_name: &'a str,
    pub schedule_id: Uuid,
}

/// Row struct for reading from the availabilities table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = availabilities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AvailabilityRow {
    pub candidate_id: i32,
    pub user_id: Uuid,
    pub availability: i16,
    #[expect(dead_code, reason = "selected for completeness; queries filter on it")]
    pub schedule_id: Uuid,
}

/// Insertable struct for creating new availability records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = availabilities)]
pub(crate) struct NewAvailabilityRow {
    pub candidate_id: i32,
    pub user_id: Uuid,
    pub availability: i16,
    pub schedule_id: Uuid,
}

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub schedule_id: Uuid,
    pub user_id: Uuid,
    pub comment: String,
}

/// Insertable struct for creating new comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub schedule_id: Uuid,
    pub user_id: Uuid,
    pub comment: &'a str,
}

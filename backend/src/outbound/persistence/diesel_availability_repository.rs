//! PostgreSQL-backed `AvailabilityRepository` implementation using Diesel.
//!
//! The upsert targets the (candidate_id, user_id) composite key in a single
//! statement, so concurrent writers resolve to last-writer-wins without
//! application-level locking.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    AvailabilityEntry, AvailabilityRepository, AvailabilityRepositoryError,
};
use crate::domain::{Attendance, Availability, User, UserId, Username};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AvailabilityRow, NewAvailabilityRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{availabilities, users};

/// Diesel-backed implementation of the availability repository port.
#[derive(Clone)]
pub struct DieselAvailabilityRepository {
    pool: DbPool,
}

impl DieselAvailabilityRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> AvailabilityRepositoryError {
    map_pool_error(error, AvailabilityRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> AvailabilityRepositoryError {
    map_diesel_error(
        error,
        AvailabilityRepositoryError::query,
        AvailabilityRepositoryError::connection,
    )
}

fn rows_to_entry(
    row: AvailabilityRow,
    user: UserRow,
) -> Result<AvailabilityEntry, AvailabilityRepositoryError> {
    let username = Username::new(user.username).map_err(|err| {
        AvailabilityRepositoryError::query(format!("stored username invalid: {err}"))
    })?;
    let attendance = Attendance::from_i16(row.availability)
        .map_err(|err| AvailabilityRepositoryError::query(err.to_string()))?;
    Ok(AvailabilityEntry {
        user: User::new(UserId::from_uuid(user.id), username),
        candidate_id: row.candidate_id,
        attendance,
    })
}

#[async_trait]
impl AvailabilityRepository for DieselAvailabilityRepository {
    async fn upsert(
        &self,
        availability: &Availability,
    ) -> Result<(), AvailabilityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewAvailabilityRow {
            candidate_id: availability.candidate_id,
            user_id: *availability.user_id.as_uuid(),
            availability: availability.attendance.as_i16(),
            schedule_id: availability.schedule_id,
        };

        diesel::insert_into(availabilities::table)
            .values(&new_row)
            .on_conflict((availabilities::candidate_id, availabilities::user_id))
            .do_update()
            .set(availabilities::availability.eq(new_row.availability))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<Vec<AvailabilityEntry>, AvailabilityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<(AvailabilityRow, UserRow)> = availabilities::table
            .inner_join(users::table)
            .filter(availabilities::schedule_id.eq(schedule_id))
            .order((users::username.asc(), availabilities::candidate_id.asc()))
            .select((AvailabilityRow::as_select(), UserRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter()
            .map(|(row, user)| rows_to_entry(row, user))
            .collect()
    }

    async fn delete_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<u64, AvailabilityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let removed =
            diesel::delete(availabilities::table.filter(availabilities::schedule_id.eq(schedule_id)))
                .execute(&mut conn)
                .await
                .map_err(diesel_error)?;

        Ok(removed as u64)
    }
}

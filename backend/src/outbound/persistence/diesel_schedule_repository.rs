//! PostgreSQL-backed `ScheduleRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ScheduleRepository, ScheduleRepositoryError};
use crate::domain::{Schedule, ScheduleName, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewScheduleRow, ScheduleRow, ScheduleUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::schedules;

/// Diesel-backed implementation of the schedule repository port.
#[derive(Clone)]
pub struct DieselScheduleRepository {
    pool: DbPool,
}

impl DieselScheduleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ScheduleRepositoryError {
    map_pool_error(error, ScheduleRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ScheduleRepositoryError {
    map_diesel_error(
        error,
        ScheduleRepositoryError::query,
        ScheduleRepositoryError::connection,
    )
}

fn row_to_schedule(row: ScheduleRow) -> Schedule {
    Schedule {
        schedule_id: row.schedule_id,
        name: ScheduleName::coerce(row.schedule_name),
        memo: row.memo,
        created_by: UserId::from_uuid(row.created_by),
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl ScheduleRepository for DieselScheduleRepository {
    async fn create(&self, schedule: &Schedule) -> Result<(), ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewScheduleRow {
            schedule_id: schedule.schedule_id,
            schedule_name: schedule.name.as_ref(),
            memo: schedule.memo.as_str(),
            created_by: *schedule.created_by.as_uuid(),
            updated_at: schedule.updated_at,
        };

        diesel::insert_into(schedules::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find(&self, schedule_id: &Uuid) -> Result<Option<Schedule>, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = schedules::table
            .filter(schedules::schedule_id.eq(schedule_id))
            .select(ScheduleRow::as_select())
            .first::<ScheduleRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(row_to_schedule))
    }

    async fn update(&self, schedule: &Schedule) -> Result<(), ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let update_row = ScheduleUpdate {
            schedule_name: schedule.name.as_ref(),
            memo: schedule.memo.as_str(),
            updated_at: schedule.updated_at,
        };

        diesel::update(schedules::table.filter(schedules::schedule_id.eq(schedule.schedule_id)))
            .set(&update_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn delete(&self, schedule_id: &Uuid) -> Result<(), ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(schedules::table.filter(schedules::schedule_id.eq(schedule_id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}

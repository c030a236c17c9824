//! PostgreSQL-backed `CandidateRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Candidate;
use crate::domain::ports::{CandidateRepository, CandidateRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CandidateRow, NewCandidateRow};
use super::pool::{DbPool, PoolError};
use super::schema::candidates;

/// Diesel-backed implementation of the candidate repository port.
#[derive(Clone)]
pub struct DieselCandidateRepository {
    pool: DbPool,
}

impl DieselCandidateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CandidateRepositoryError {
    map_pool_error(error, CandidateRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CandidateRepositoryError {
    map_diesel_error(
        error,
        CandidateRepositoryError::query,
        CandidateRepositoryError::connection,
    )
}

fn row_to_candidate(row: CandidateRow) -> Candidate {
    Candidate {
        candidate_id: row.candidate_id,
        schedule_id: row.schedule_id,
        candidate_name: row.candidate_name,
    }
}

#[async_trait]
impl CandidateRepository for DieselCandidateRepository {
    async fn add_all(
        &self,
        schedule_id: &Uuid,
        candidate_names: &[String],
    ) -> Result<Vec<Candidate>, CandidateRepositoryError> {
        if candidate_names.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_rows: Vec<NewCandidateRow<'_>> = candidate_names
            .iter()
            .map(|name| NewCandidateRow {
                candidate_name: name.as_str(),
                schedule_id: *schedule_id,
            })
            .collect();

        let rows: Vec<CandidateRow> = diesel::insert_into(candidates::table)
            .values(&new_rows)
            .returning(CandidateRow::as_returning())
            .get_results(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(row_to_candidate).collect())
    }

    async fn list_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<Vec<Candidate>, CandidateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<CandidateRow> = candidates::table
            .filter(candidates::schedule_id.eq(schedule_id))
            .order(candidates::candidate_id.asc())
            .select(CandidateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(row_to_candidate).collect())
    }

    async fn delete_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<u64, CandidateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let removed = diesel::delete(candidates::table.filter(candidates::schedule_id.eq(schedule_id)))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(removed as u64)
    }
}

//! Driven port for schedule persistence.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Schedule};

/// Failure raised by a [`ScheduleRepository`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleRepositoryError {
    #[error("schedule repository connection failed: {message}")]
    Connection { message: String },
    #[error("schedule repository query failed: {message}")]
    Query { message: String },
}

impl ScheduleRepositoryError {
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

impl From<ScheduleRepositoryError> for Error {
    fn from(err: ScheduleRepositoryError) -> Self {
        match err {
            ScheduleRepositoryError::Connection { message } => Self::service_unavailable(message),
            ScheduleRepositoryError::Query { message } => Self::internal(message),
        }
    }
}

/// Storage abstraction for schedules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Persist a new schedule row.
    async fn create(&self, schedule: &Schedule) -> Result<(), ScheduleRepositoryError>;

    /// Look up a schedule by its identifier.
    async fn find(&self, schedule_id: &Uuid) -> Result<Option<Schedule>, ScheduleRepositoryError>;

    /// Overwrite the name, memo and update timestamp of an existing row.
    async fn update(&self, schedule: &Schedule) -> Result<(), ScheduleRepositoryError>;

    /// Remove a schedule row.
    async fn delete(&self, schedule_id: &Uuid) -> Result<(), ScheduleRepositoryError>;
}

/// In-memory [`ScheduleRepository`] used in tests and when no database is
/// configured.
#[derive(Debug, Default)]
pub struct InMemoryScheduleRepository {
    rows: Mutex<HashMap<Uuid, Schedule>>,
}

impl InMemoryScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, Schedule>>, ScheduleRepositoryError> {
        self.rows
            .lock()
            .map_err(|_| ScheduleRepositoryError::query("schedule store lock poisoned"))
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepository {
    async fn create(&self, schedule: &Schedule) -> Result<(), ScheduleRepositoryError> {
        self.rows()?.insert(schedule.schedule_id, schedule.clone());
        Ok(())
    }

    async fn find(&self, schedule_id: &Uuid) -> Result<Option<Schedule>, ScheduleRepositoryError> {
        Ok(self.rows()?.get(schedule_id).cloned())
    }

    async fn update(&self, schedule: &Schedule) -> Result<(), ScheduleRepositoryError> {
        self.rows()?.insert(schedule.schedule_id, schedule.clone());
        Ok(())
    }

    async fn delete(&self, schedule_id: &Uuid) -> Result<(), ScheduleRepositoryError> {
        self.rows()?.remove(schedule_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::{ErrorCode, ScheduleName, UserId};

    fn sample_schedule() -> Schedule {
        Schedule {
            schedule_id: Uuid::new_v4(),
            name: ScheduleName::coerce("team lunch"),
            memo: "somewhere cheap".to_owned(),
            created_by: UserId::random(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_then_find_returns_the_row() {
        let repo = InMemoryScheduleRepository::new();
        let schedule = sample_schedule();

        repo.create(&schedule).await.expect("create succeeds");
        let found = repo.find(&schedule.schedule_id).await.expect("find succeeds");

        assert_eq!(found, Some(schedule));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_the_row() {
        let repo = InMemoryScheduleRepository::new();
        let schedule = sample_schedule();

        repo.create(&schedule).await.expect("create succeeds");
        repo.delete(&schedule.schedule_id).await.expect("delete succeeds");
        let found = repo.find(&schedule.schedule_id).await.expect("find succeeds");

        assert_eq!(found, None);
    }

    #[rstest]
    fn connection_errors_map_to_service_unavailable() {
        let err: Error = ScheduleRepositoryError::connection("pool exhausted").into();
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    fn query_errors_map_to_internal() {
        let err: Error = ScheduleRepositoryError::query("constraint violated").into();
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}

//! Driven port for availability persistence.
//!
//! Availabilities are keyed on (candidate, user): writing an answer for a
//! pair that already has one replaces it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{InMemoryUserRepository, UserRepository};
use crate::domain::{Attendance, Availability, Error, User, UserId};

/// Failure raised by an [`AvailabilityRepository`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvailabilityRepositoryError {
    #[error("availability repository connection failed: {message}")]
    Connection { message: String },
    #[error("availability repository query failed: {message}")]
    Query { message: String },
}

impl AvailabilityRepositoryError {
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

impl From<AvailabilityRepositoryError> for Error {
    fn from(err: AvailabilityRepositoryError) -> Self {
        match err {
            AvailabilityRepositoryError::Connection { message } => {
                Self::service_unavailable(message)
            }
            AvailabilityRepositoryError::Query { message } => Self::internal(message),
        }
    }
}

/// One availability row joined with the responding user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityEntry {
    pub user: User,
    pub candidate_id: i32,
    pub attendance: Attendance,
}

/// Storage abstraction for availabilities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Insert the answer, or replace the stored one for the same
    /// (candidate, user) pair.
    async fn upsert(&self, availability: &Availability)
        -> Result<(), AvailabilityRepositoryError>;

    /// List every answer for a schedule joined with the responding user,
    /// ordered by username ascending then `candidate_id` ascending.
    async fn list_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<Vec<AvailabilityEntry>, AvailabilityRepositoryError>;

    /// Remove every answer for a schedule, returning the removed count.
    async fn delete_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<u64, AvailabilityRepositoryError>;
}

/// In-memory [`AvailabilityRepository`] used in tests and when no database
/// is configured.
///
/// Resolves usernames through a shared [`InMemoryUserRepository`], mirroring
/// the join a relational backend performs.
#[derive(Debug)]
pub struct InMemoryAvailabilityRepository {
    users: Arc<InMemoryUserRepository>,
    rows: Mutex<HashMap<(i32, UserId), Availability>>,
}

impl InMemoryAvailabilityRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            users,
            rows: Mutex::new(HashMap::new()),
        }
    }

    fn rows(
        &self,
    ) -> Result<
        std::sync::MutexGuard<'_, HashMap<(i32, UserId), Availability>>,
        AvailabilityRepositoryError,
    > {
        self.rows
            .lock()
            .map_err(|_| AvailabilityRepositoryError::query("availability store lock poisoned"))
    }
}

#[async_trait]
impl AvailabilityRepository for InMemoryAvailabilityRepository {
    async fn upsert(
        &self,
        availability: &Availability,
    ) -> Result<(), AvailabilityRepositoryError> {
        self.rows()?.insert(
            (availability.candidate_id, availability.user_id),
            availability.clone(),
        );
        Ok(())
    }

    async fn list_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<Vec<AvailabilityEntry>, AvailabilityRepositoryError> {
        let rows: Vec<Availability> = self
            .rows()?
            .values()
            .filter(|row| &row.schedule_id == schedule_id)
            .cloned()
            .collect();

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let user = self
                .users
                .find(&row.user_id)
                .await
                .map_err(|err| AvailabilityRepositoryError::query(err.to_string()))?
                .ok_or_else(|| {
                    AvailabilityRepositoryError::query(format!(
                        "availability references unknown user {}",
                        row.user_id
                    ))
                })?;
            entries.push(AvailabilityEntry {
                user,
                candidate_id: row.candidate_id,
                attendance: row.attendance,
            });
        }
        entries.sort_by(|a, b| {
            a.user
                .username
                .as_ref()
                .cmp(b.user.username.as_ref())
                .then(a.candidate_id.cmp(&b.candidate_id))
        });
        Ok(entries)
    }

    async fn delete_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<u64, AvailabilityRepositoryError> {
        let mut rows = self.rows()?;
        let before = rows.len();
        rows.retain(|_, row| &row.schedule_id != schedule_id);
        Ok((before - rows.len()) as u64)
    }
}

//! Driven port for candidate persistence.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Candidate, Error};

/// Failure raised by a [`CandidateRepository`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CandidateRepositoryError {
    #[error("candidate repository connection failed: {message}")]
    Connection { message: String },
    #[error("candidate repository query failed: {message}")]
    Query { message: String },
}

impl CandidateRepositoryError {
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

impl From<CandidateRepositoryError> for Error {
    fn from(err: CandidateRepositoryError) -> Self {
        match err {
            CandidateRepositoryError::Connection { message } => Self::service_unavailable(message),
            CandidateRepositoryError::Query { message } => Self::internal(message),
        }
    }
}

/// Storage abstraction for schedule candidates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Insert a batch of candidates for `schedule_id`, returning the stored
    /// rows with their assigned identifiers.
    async fn add_all(
        &self,
        schedule_id: &Uuid,
        candidate_names: &[String],
    ) -> Result<Vec<Candidate>, CandidateRepositoryError>;

    /// List all candidates of a schedule, ordered by `candidate_id` ascending.
    async fn list_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<Vec<Candidate>, CandidateRepositoryError>;

    /// Remove every candidate of a schedule, returning the removed count.
    async fn delete_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<u64, CandidateRepositoryError>;
}

#[derive(Debug)]
struct CandidateStore {
    next_id: i32,
    rows: Vec<Candidate>,
}

impl Default for CandidateStore {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

/// In-memory [`CandidateRepository`] used in tests and when no database is
/// configured.
#[derive(Debug, Default)]
pub struct InMemoryCandidateRepository {
    store: Mutex<CandidateStore>,
}

impl InMemoryCandidateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, CandidateStore>, CandidateRepositoryError> {
        self.store
            .lock()
            .map_err(|_| CandidateRepositoryError::query("candidate store lock poisoned"))
    }
}

#[async_trait]
impl CandidateRepository for InMemoryCandidateRepository {
    async fn add_all(
        &self,
        schedule_id: &Uuid,
        candidate_names: &[String],
    ) -> Result<Vec<Candidate>, CandidateRepositoryError> {
        let mut store = self.store()?;
        let mut inserted = Vec::with_capacity(candidate_names.len());
        for name in candidate_names {
            let candidate = Candidate {
                candidate_id: store.next_id,
                schedule_id: *schedule_id,
                candidate_name: name.clone(),
            };
            store.next_id += 1;
            store.rows.push(candidate.clone());
            inserted.push(candidate);
        }
        Ok(inserted)
    }

    async fn list_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<Vec<Candidate>, CandidateRepositoryError> {
        let store = self.store()?;
        let mut rows: Vec<Candidate> = store
            .rows
            .iter()
            .filter(|row| &row.schedule_id == schedule_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.candidate_id);
        Ok(rows)
    }

    async fn delete_for_schedule(
        &self,
        schedule_id: &Uuid,
    ) -> Result<u64, CandidateRepositoryError> {
        let mut store = self.store()?;
        let before = store.rows.len();
        store.rows.retain(|row| &row.schedule_id != schedule_id);
        Ok((before - store.rows.len()) as u64)
    }
}

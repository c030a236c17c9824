//! Driven port for user persistence.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Failure raised by a [`UserRepository`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserRepositoryError {
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

impl From<UserRepositoryError> for Error {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::Connection { message } => Self::service_unavailable(message),
            UserRepositoryError::Query { message } => Self::internal(message),
        }
    }
}

/// Storage abstraction for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user, or refresh the stored username if the id exists.
    async fn save(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Look up a user by identifier.
    async fn find(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError>;
}

/// In-memory [`UserRepository`] used in tests and when no database is
/// configured.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<UserId, User>>, UserRepositoryError> {
        self.rows
            .lock()
            .map_err(|_| UserRepositoryError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), UserRepositoryError> {
        self.rows()?.insert(user.id, user.clone());
        Ok(())
    }

    async fn find(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.rows()?.get(user_id).cloned())
    }
}

//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AvailabilityCommand, CommentCommand, InMemoryAvailabilityRepository,
    InMemoryCandidateRepository, InMemoryCommentRepository, InMemoryScheduleRepository,
    InMemoryUserRepository, ScheduleCommand, ScheduleQuery, UserRepository,
};
use crate::domain::{
    AvailabilityService, CommentService, ScheduleCommandService, ScheduleQueryService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub schedule_commands: Arc<dyn ScheduleCommand>,
    pub schedule_queries: Arc<dyn ScheduleQuery>,
    pub availabilities: Arc<dyn AvailabilityCommand>,
    pub comments: Arc<dyn CommentCommand>,
}

impl HttpState {
    /// Wire the services over in-memory repositories.
    ///
    /// Used by handler tests and as the fallback when no database is
    /// configured, so the server still serves real traffic (without
    /// durability) in development.
    pub fn in_memory() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let schedules = Arc::new(InMemoryScheduleRepository::new());
        let candidates = Arc::new(InMemoryCandidateRepository::new());
        let availabilities = Arc::new(InMemoryAvailabilityRepository::new(Arc::clone(&users)));
        let comments = Arc::new(InMemoryCommentRepository::new());

        Self {
            users: users.clone(),
            schedule_commands: Arc::new(ScheduleCommandService::new(
                Arc::clone(&schedules),
                Arc::clone(&candidates),
                Arc::clone(&availabilities),
                Arc::clone(&comments),
            )),
            schedule_queries: Arc::new(ScheduleQueryService::new(
                schedules,
                candidates,
                Arc::clone(&availabilities),
                Arc::clone(&comments),
            )),
            availabilities: Arc::new(AvailabilityService::new(availabilities)),
            comments: Arc::new(CommentService::new(comments)),
        }
    }
}

//! Builders for HTTP state backed by either the database or memory.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use backend::domain::{
    AvailabilityService, CommentService, ScheduleCommandService, ScheduleQueryService,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DbPool, DieselAvailabilityRepository, DieselCandidateRepository, DieselCommentRepository,
    DieselScheduleRepository, DieselUserRepository,
};

use super::ServerConfig;

fn build_db_backed_state(pool: &DbPool) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let schedules = Arc::new(DieselScheduleRepository::new(pool.clone()));
    let candidates = Arc::new(DieselCandidateRepository::new(pool.clone()));
    let availabilities = Arc::new(DieselAvailabilityRepository::new(pool.clone()));
    let comments = Arc::new(DieselCommentRepository::new(pool.clone()));

    HttpState {
        users,
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

/// Build the shared HTTP state from the configured pool, falling back to
/// in-memory repositories when no database is configured.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => build_db_backed_state(pool),
        None => {
            warn!("no database configured; serving from in-memory state");
            HttpState::in_memory()
        }
    };
    web::Data::new(state)
}

//! Persistence adapters backing the domain repository ports.
//!
//! Each adapter owns a handle to the shared bb8 connection pool and maps
//! Diesel failures into the coarse repository error variants the domain
//! understands.

mod diesel_availability_repository;
mod diesel_candidate_repository;
mod diesel_comment_repository;
mod diesel_error_mapping;
mod diesel_schedule_repository;
mod diesel_user_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_availability_repository::DieselAvailabilityRepository;
pub use diesel_candidate_repository::DieselCandidateRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_schedule_repository::DieselScheduleRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

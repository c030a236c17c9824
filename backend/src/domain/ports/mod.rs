//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to talk to storage; each
//! trait exposes strongly typed errors so adapters map their failures into
//! predictable variants. Driving ports are the operations inbound adapters
//! invoke, expressed as serializable request and response payloads.

pub mod availability_command;
pub mod availability_repository;
pub mod candidate_repository;
pub mod comment_command;
pub mod comment_repository;
pub mod schedule_command;
pub mod schedule_query;
pub mod schedule_repository;
pub mod user_repository;

pub use self::availability_command::{
    AvailabilityCommand, UpdateAvailabilityRequest, UpdateAvailabilityResponse,
};
pub use self::availability_repository::{
    AvailabilityEntry, AvailabilityRepository, AvailabilityRepositoryError,
    InMemoryAvailabilityRepository,
};
pub use self::candidate_repository::{
    CandidateRepository, CandidateRepositoryError, InMemoryCandidateRepository,
};
pub use self::comment_command::{CommentCommand, UpdateCommentRequest, UpdateCommentResponse};
pub use self::comment_repository::{
    CommentRepository, CommentRepositoryError, InMemoryCommentRepository,
};
pub use self::schedule_command::{
    CreateScheduleRequest, CreateScheduleResponse, DeleteScheduleRequest, ScheduleCommand,
    UpdateScheduleRequest, UpdateScheduleResponse,
};
pub use self::schedule_query::{
    CandidatePayload, GetScheduleDetailsRequest, GetScheduleDetailsResponse,
    GetScheduleForEditRequest, GetScheduleForEditResponse, RosterEntryPayload, SchedulePayload,
    ScheduleQuery,
};
pub use self::schedule_repository::{
    InMemoryScheduleRepository, ScheduleRepository, ScheduleRepositoryError,
};
pub use self::user_repository::{InMemoryUserRepository, UserRepository, UserRepositoryError};

#[cfg(test)]
pub use self::availability_command::MockAvailabilityCommand;
#[cfg(test)]
pub use self::availability_repository::MockAvailabilityRepository;
#[cfg(test)]
pub use self::candidate_repository::MockCandidateRepository;
#[cfg(test)]
pub use self::comment_command::MockCommentCommand;
#[cfg(test)]
pub use self::comment_repository::MockCommentRepository;
#[cfg(test)]
pub use self::schedule_command::MockScheduleCommand;
#[cfg(test)]
pub use self::schedule_query::MockScheduleQuery;
#[cfg(test)]
pub use self::schedule_repository::MockScheduleRepository;
#[cfg(test)]
pub use self::user_repository::MockUserRepository;

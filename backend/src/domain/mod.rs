//! Domain primitives and aggregates.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.

pub mod availability;
pub mod availability_service;
pub mod comment;
pub mod comment_service;
pub mod error;
pub mod ports;
pub mod schedule;
pub mod schedule_service;
pub mod user;

pub use self::availability::{Attendance, AttendanceOutOfRange, Availability};
pub use self::availability_service::AvailabilityService;
pub use self::comment::{COMMENT_MAX, Comment, CommentText};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::schedule::{
    Candidate, SCHEDULE_NAME_MAX, Schedule, ScheduleName, UNTITLED_SCHEDULE_NAME,
    parse_candidate_names,
};
pub use self::schedule_service::{ScheduleCommandService, ScheduleQueryService};
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};

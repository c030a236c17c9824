//! Schedule and candidate entities.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::UserId;

/// Maximum allowed length for a schedule name, in characters.
pub const SCHEDULE_NAME_MAX: usize = 255;

/// Placeholder used when a schedule is submitted without a name.
pub const UNTITLED_SCHEDULE_NAME: &str = "(untitled schedule)";

/// Schedule display name.
///
/// Construction never fails: oversize input is truncated to
/// [`SCHEDULE_NAME_MAX`] characters and empty input falls back to
/// [`UNTITLED_SCHEDULE_NAME`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ScheduleName(String);

impl ScheduleName {
    /// Coerce raw form input into a valid schedule name.
    pub fn coerce(raw: impl AsRef<str>) -> Self {
        let truncated: String = raw.as_ref().chars().take(SCHEDULE_NAME_MAX).collect();
        if truncated.is_empty() {
            Self(UNTITLED_SCHEDULE_NAME.to_owned())
        } else {
            Self(truncated)
        }
    }
}

impl AsRef<str> for ScheduleName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ScheduleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<String> for ScheduleName {
    fn from(value: String) -> Self {
        Self::coerce(value)
    }
}

impl From<ScheduleName> for String {
    fn from(value: ScheduleName) -> Self {
        value.0
    }
}

/// A named event with a set of date/time candidates, owned by its creator.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub schedule_id: Uuid,
    pub name: ScheduleName,
    pub memo: String,
    pub created_by: UserId,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    /// Whether `user_id` is the creator and may edit or delete the schedule.
    pub fn is_created_by(&self, user_id: &UserId) -> bool {
        &self.created_by == user_id
    }
}

/// One proposed date/time option within a schedule.
///
/// `candidate_id` is assigned by storage; listings order by it ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub candidate_id: i32,
    pub schedule_id: Uuid,
    pub candidate_name: String,
}

/// Parse a newline-separated candidate block into individual names.
///
/// Each line is trimmed and blank lines are dropped, so a submission of
/// only whitespace yields no candidates.
pub fn parse_candidate_names(raw: &str) -> Vec<String> {
    raw.trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

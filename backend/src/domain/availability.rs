//! Attendance responses for schedule candidates.

use uuid::Uuid;

use crate::domain::UserId;

/// Tri-state attendance answer for one candidate.
///
/// Stored as a small integer; any value outside 0..=2 is rejected at the
/// boundary rather than coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[repr(i16)]
pub enum Attendance {
    #[default]
    Absent = 0,
    Undecided = 1,
    Attending = 2,
}

/// Raised when a stored or submitted attendance value is outside 0..=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("attendance must be 0, 1, or 2, got {value}")]
pub struct AttendanceOutOfRange {
    pub value: i16,
}

impl Attendance {
    /// Decode a stored integer value.
    pub fn from_i16(value: i16) -> Result<Self, AttendanceOutOfRange> {
        match value {
            0 => Ok(Self::Absent),
            1 => Ok(Self::Undecided),
            2 => Ok(Self::Attending),
            value => Err(AttendanceOutOfRange { value }),
        }
    }

    /// Integer encoding used in storage and API payloads.
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    /// Interpret a raw form field.
    ///
    /// A missing or unparsable field defaults to [`Attendance::Absent`].
    /// A value that parses but falls outside 0..=2 is an error.
    pub fn from_form_value(raw: Option<&str>) -> Result<Self, AttendanceOutOfRange> {
        match raw.and_then(|value| value.trim().parse::<i16>().ok()) {
            Some(value) => Self::from_i16(value),
            None => Ok(Self::Absent),
        }
    }
}

/// One user's answer for one candidate of a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub schedule_id: Uuid,
    pub user_id: UserId,
    pub candidate_id: i32,
    pub attendance: Attendance,
}

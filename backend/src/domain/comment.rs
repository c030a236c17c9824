//! Per-schedule comments.
//!
//! Each user keeps at most one comment per schedule; posting again replaces
//! the previous text.

use uuid::Uuid;

use crate::domain::UserId;

/// Maximum allowed length for a comment, in characters.
pub const COMMENT_MAX: usize = 255;

/// Comment body.
///
/// Construction never fails: oversize input is truncated to
/// [`COMMENT_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CommentText(String);

impl CommentText {
    /// Coerce raw input into a valid comment body.
    pub fn coerce(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().chars().take(COMMENT_MAX).collect())
    }
}

impl AsRef<str> for CommentText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for CommentText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<String> for CommentText {
    fn from(value: String) -> Self {
        Self::coerce(value)
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}

/// One user's comment on a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub schedule_id: Uuid,
    pub user_id: UserId,
    pub text: CommentText,
}

//! Error taxonomy for content operations.
//!
//! Rejections (`*NotFound`, `DuplicateWeek`, `UnknownMemberType`, ...) are
//! reported to the operator and leave every document untouched. `Io`,
//! `Malformed` and `Invalid` mean a document could not be used at all.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a valid document: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} failed validation: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
    #[error("Event {0} not found")]
    EventNotFound(u64),
    #[error("Member {0} not found")]
    MemberNotFound(u64),
    #[error("Month '{0}' not found")]
    UnknownMonth(String),
    #[error("POTW for {month} week {week} already exists")]
    DuplicateWeek { month: String, week: u8 },
    #[error("Week must be between 1 and 4, got {0}")]
    InvalidWeek(u8),
    #[error("Invalid member type '{0}'")]
    UnknownMemberType(String),
}

impl ContentError {
    /// True for operator-facing rejections that never touch the disk.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            ContentError::Io { .. } | ContentError::Malformed { .. } | ContentError::Invalid { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;

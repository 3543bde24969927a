//! Error types for synchronization

use liftlog_core::GroupKind;
use thiserror::Error;
use watcher::GroupId;

/// Message shown to the user for any failed save
pub const UPDATE_FAILED: &str = "Update failed";

/// A failed save
///
/// Transport failures and rejections reach callers as the same type; the
/// variant only adds detail for logs.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Update failed: request did not complete: {0}")]
    Transport(String),

    #[error("Update failed: server returned {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Update failed: unreadable response body: {0}")]
    InvalidResponse(String),
}

impl SyncError {
    /// Text for user-facing alerts, identical for every variant
    pub fn user_message(&self) -> &'static str {
        UPDATE_FAILED
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            SyncError::InvalidResponse(error.to_string())
        } else {
            SyncError::Transport(error.to_string())
        }
    }
}

/// An event that could not be routed to a field
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no group {0} on this page")]
    UnknownGroup(GroupId),

    #[error("{kind} group {group} has no watched field `{field}`")]
    UnknownField {
        group: GroupId,
        kind: GroupKind,
        field: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_failure_shares_user_message() {
        let errors = [
            SyncError::Transport("connection refused".into()),
            SyncError::Rejected {
                status: 500,
                detail: "boom".into(),
            },
            SyncError::InvalidResponse("expected value".into()),
        ];
        for error in &errors {
            assert_eq!(error.user_message(), "Update failed");
            assert!(error.to_string().starts_with("Update failed"));
        }
        assert_eq!(errors[1].status(), Some(500));
        assert_eq!(errors[0].status(), None);
    }
}

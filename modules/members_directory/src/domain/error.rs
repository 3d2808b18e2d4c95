use thiserror::Error;

use crate::contract::{error::GatewayError, model::MemberId};

/// Modal session transitions that are not allowed from the current state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("A modal session is already open")]
    AlreadyOpen,

    #[error("No modal session is open")]
    NotOpen,

    #[error("The create session is not open")]
    NotCreating,

    #[error("The edit session is not open")]
    NotEditing,

    #[error("Edit session targets member {expected}, not {got}")]
    TargetMismatch { expected: MemberId, got: MemberId },

    #[error("A submission is already in flight for this session")]
    SubmissionInFlight,

    #[error("Viewer is not permitted to create members")]
    Forbidden,

    #[error("Member {id} is not in the directory")]
    UnknownMember { id: MemberId },

    #[error("Member {id} is hidden by the current search")]
    NotVisible { id: MemberId },
}

/// Errors returned by directory view operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Submission rejected: {field}: {message}")]
    MutationRejected {
        field: &'static str,
        message: String,
    },

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl DirectoryError {
    pub fn rejected(field: &'static str, message: impl Into<String>) -> Self {
        Self::MutationRejected {
            field,
            message: message.into(),
        }
    }
}

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::contract::client::DirectoryGateway;
use crate::contract::model::{Member, MemberId, MemberPatch, NewMember};
use crate::domain::collection::CanonicalCollection;
use crate::domain::error::DirectoryError;
use crate::domain::session::{SessionController, SubmitTicket};

/// Result of a mutation the gateway accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    /// Record as returned by the gateway.
    pub member: Member,
    /// Whether the follow-up refetch succeeded.
    pub refreshed: bool,
    /// False when the user cancelled the session while the call was pending.
    pub session_closed: bool,
}

/// Submits create/edit sessions to the gateway.
///
/// Success: refetch the canonical collection, then close the session.
/// Failure: record the error on the still-open session and leave the
/// collection untouched. Nothing is ever applied optimistically.
#[derive(Clone)]
pub struct MutationCoordinator {
    gateway: Arc<dyn DirectoryGateway>,
    collection: Arc<CanonicalCollection>,
    sessions: Arc<SessionController>,
}

impl MutationCoordinator {
    pub fn new(
        gateway: Arc<dyn DirectoryGateway>,
        collection: Arc<CanonicalCollection>,
        sessions: Arc<SessionController>,
    ) -> Self {
        Self {
            gateway,
            collection,
            sessions,
        }
    }

    #[instrument(
        name = "members_directory.coordinator.submit_create",
        skip_all
    )]
    pub async fn submit_create(&self, draft: NewMember) -> Result<MutationOutcome, DirectoryError> {
        let ticket = self.sessions.begin_create(draft.clone())?;

        if let Err(e) = validate_new_member(&draft) {
            return Err(self.reject(ticket, e));
        }

        match self.gateway.create(draft).await {
            Ok(created) => {
                info!(member_id = %created.id, "Member created");
                Ok(self.settle(ticket, created).await)
            }
            Err(e) => {
                warn!(error = %e, "Creating member failed; session kept open");
                self.sessions.fail(ticket, e.to_string());
                Err(e.into())
            }
        }
    }

    #[instrument(
        name = "members_directory.coordinator.submit_edit",
        skip(self, patch),
        fields(member_id = %id)
    )]
    pub async fn submit_edit(
        &self,
        id: &MemberId,
        patch: MemberPatch,
    ) -> Result<MutationOutcome, DirectoryError> {
        let ticket = self.sessions.begin_edit(id, patch.clone())?;

        if let Err(e) = validate_patch(&patch) {
            return Err(self.reject(ticket, e));
        }

        match self.gateway.update(id, patch).await {
            Ok(updated) => {
                info!("Member updated");
                Ok(self.settle(ticket, updated).await)
            }
            Err(e) => {
                warn!(error = %e, "Updating member failed; session kept open");
                self.sessions.fail(ticket, e.to_string());
                Err(e.into())
            }
        }
    }

    /// Refetch strictly after the write was acknowledged, then close.
    async fn settle(&self, ticket: SubmitTicket, member: Member) -> MutationOutcome {
        let refreshed = self.collection.refresh(self.gateway.as_ref()).await.is_ok();
        let session_closed = self.sessions.complete(ticket);
        if !session_closed {
            info!("Session was cancelled before the mutation finished");
        }
        MutationOutcome {
            member,
            refreshed,
            session_closed,
        }
    }

    fn reject(&self, ticket: SubmitTicket, error: DirectoryError) -> DirectoryError {
        warn!(error = %error, "Submission rejected before reaching the gateway");
        self.sessions.fail(ticket, error.to_string());
        error
    }
}

// --- validation helpers ---

fn validate_new_member(draft: &NewMember) -> Result<(), DirectoryError> {
    validate_name(&draft.name)?;
    validate_email(&draft.email)?;
    Ok(())
}

fn validate_patch(patch: &MemberPatch) -> Result<(), DirectoryError> {
    if patch.is_empty() {
        return Err(DirectoryError::rejected("patch", "nothing to update"));
    }
    if let Some(ref name) = patch.name {
        validate_name(name)?;
    }
    if let Some(ref email) = patch.email {
        validate_email(email)?;
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), DirectoryError> {
    if name.trim().is_empty() {
        return Err(DirectoryError::rejected("name", "cannot be empty"));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), DirectoryError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(DirectoryError::rejected("email", "not a valid address"));
    }
    Ok(())
}

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, instrument};

use crate::contract::client::DirectoryGateway;
use crate::contract::model::{Member, MemberId, MemberPatch, NewMember};
use crate::domain::collection::CanonicalCollection;
use crate::domain::coordinator::{MutationCoordinator, MutationOutcome};
use crate::domain::error::{DirectoryError, SessionError};
use crate::domain::filter::visible_members;
use crate::domain::render::{CreateTrigger, DirectoryRender, MemberRow, ModalSlot};
use crate::domain::role_gate::RoleGate;
use crate::domain::session::{ModalSession, SessionController};
use crate::domain::viewer::ViewerContext;

/// Member directory view: owns the canonical collection, the search query and
/// the modal session, and routes modal completions into the coordinator.
///
/// Every operation takes `&self` so the view can sit behind an `Arc` shared by
/// UI callbacks. Dropping a pending operation discards its result.
pub struct DirectoryView {
    gateway: Arc<dyn DirectoryGateway>,
    gate: RoleGate,
    collection: Arc<CanonicalCollection>,
    sessions: Arc<SessionController>,
    coordinator: MutationCoordinator,
    query: Mutex<String>,
}

impl DirectoryView {
    pub fn new(gateway: Arc<dyn DirectoryGateway>, gate: RoleGate) -> Self {
        let collection = Arc::new(CanonicalCollection::new());
        let sessions = Arc::new(SessionController::new());
        let coordinator = MutationCoordinator::new(
            Arc::clone(&gateway),
            Arc::clone(&collection),
            Arc::clone(&sessions),
        );
        Self {
            gateway,
            gate,
            collection,
            sessions,
            coordinator,
            query: Mutex::new(String::new()),
        }
    }

    /// Initial fetch. Returns the number of members loaded.
    #[instrument(name = "members_directory.view.mount", skip(self))]
    pub async fn mount(&self) -> Result<usize, DirectoryError> {
        let members = self.collection.refresh(self.gateway.as_ref()).await?;
        info!(count = members.len(), "Directory mounted");
        Ok(members.len())
    }

    /// Manual refetch; on failure the last known collection stays visible.
    #[instrument(name = "members_directory.view.refresh", skip(self))]
    pub async fn refresh(&self) -> Result<(), DirectoryError> {
        self.collection.refresh(self.gateway.as_ref()).await?;
        Ok(())
    }

    pub fn set_query(&self, query: impl Into<String>) {
        *self.query.lock() = query.into();
    }

    pub fn query(&self) -> String {
        self.query.lock().clone()
    }

    /// Current canonical collection snapshot.
    pub fn members(&self) -> Arc<Vec<Member>> {
        self.collection.snapshot()
    }

    /// Members matching the current query, derived fresh on every call.
    pub fn visible(&self) -> Vec<Member> {
        let members = self.collection.snapshot();
        let query = self.query();
        visible_members(&members, &query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn session(&self) -> ModalSession {
        self.sessions.current()
    }

    pub fn can_create(&self, viewer: &ViewerContext) -> bool {
        self.gate.permits(viewer)
    }

    pub fn render(&self, viewer: &ViewerContext) -> DirectoryRender {
        let members = self.collection.snapshot();
        let query = self.query();
        let rows = visible_members(&members, &query)
            .into_iter()
            .map(MemberRow::from)
            .collect();
        let (create_modal, edit_modal) = ModalSlot::pair(&self.sessions.current());

        DirectoryRender {
            create_trigger: self.gate.permits(viewer).then(CreateTrigger::new),
            query,
            rows,
            create_modal,
            edit_modal,
            fetch_error: self.collection.last_error(),
        }
    }

    /// `Closed → Creating`, only for viewers the role gate admits.
    pub fn open_create(&self, viewer: &ViewerContext) -> Result<(), DirectoryError> {
        if !self.gate.permits(viewer) {
            debug!("Create session refused by role gate");
            return Err(SessionError::Forbidden.into());
        }
        self.sessions.open_create()?;
        Ok(())
    }

    /// `Closed → Editing(target)` from a visible row, snapshotting the member
    /// as currently held. Rows hidden by the search query cannot be edited.
    pub fn open_edit(&self, id: &MemberId) -> Result<(), DirectoryError> {
        let members = self.collection.snapshot();
        let query = self.query();
        let target = match visible_members(&members, &query)
            .into_iter()
            .find(|m| &m.id == id)
        {
            Some(member) => member.clone(),
            None if members.iter().any(|m| &m.id == id) => {
                return Err(SessionError::NotVisible { id: id.clone() }.into());
            }
            None => return Err(SessionError::UnknownMember { id: id.clone() }.into()),
        };
        self.sessions.open_edit(target)?;
        Ok(())
    }

    pub fn cancel(&self) -> Result<(), DirectoryError> {
        self.sessions.cancel()?;
        Ok(())
    }

    pub async fn submit_create(&self, draft: NewMember) -> Result<MutationOutcome, DirectoryError> {
        self.coordinator.submit_create(draft).await
    }

    pub async fn submit_edit(
        &self,
        id: &MemberId,
        patch: MemberPatch,
    ) -> Result<MutationOutcome, DirectoryError> {
        self.coordinator.submit_edit(id, patch).await
    }
}

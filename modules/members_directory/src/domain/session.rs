//! Modal session state machine: `Closed`, `Creating`, `Editing(target)`.
//!
//! A single tagged value holds the state, so two sessions can never be open at
//! once. [`SessionController`] wraps it for shared use from UI callbacks and
//! stamps every open with an epoch so a late mutation result can only close
//! the session it was submitted from.

use parking_lot::Mutex;
use tracing::debug;

use crate::contract::model::{Member, MemberId, MemberPatch, NewMember};
use crate::domain::error::SessionError;

/// Input and progress of an open modal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState<T> {
    /// Last input the user submitted; kept after a failure so nothing is lost.
    pub input: Option<T>,
    pub submitting: bool,
    pub error: Option<String>,
}

impl<T> Default for FormState<T> {
    fn default() -> Self {
        Self {
            input: None,
            submitting: false,
            error: None,
        }
    }
}

impl<T> FormState<T> {
    fn begin(&mut self, input: T) -> Result<(), SessionError> {
        if self.submitting {
            return Err(SessionError::SubmissionInFlight);
        }
        self.input = Some(input);
        self.submitting = true;
        self.error = None;
        Ok(())
    }

    fn fail(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalSession {
    #[default]
    Closed,
    Creating(FormState<NewMember>),
    Editing {
        /// Snapshot taken from the canonical collection when the session opened.
        target: Member,
        form: FormState<MemberPatch>,
    },
}

impl ModalSession {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        match self {
            Self::Closed => false,
            Self::Creating(form) => form.submitting,
            Self::Editing { form, .. } => form.submitting,
        }
    }

    pub fn edit_target(&self) -> Option<&Member> {
        match self {
            Self::Editing { target, .. } => Some(target),
            _ => None,
        }
    }

    /// `Closed → Creating`
    pub fn open_create(&mut self) -> Result<(), SessionError> {
        self.ensure_closed()?;
        *self = Self::Creating(FormState::default());
        Ok(())
    }

    /// `Closed → Editing(target)`
    pub fn open_edit(&mut self, target: Member) -> Result<(), SessionError> {
        self.ensure_closed()?;
        *self = Self::Editing {
            target,
            form: FormState::default(),
        };
        Ok(())
    }

    /// `Creating | Editing → Closed` on explicit user cancel. Allowed while submitting.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        if !self.is_open() {
            return Err(SessionError::NotOpen);
        }
        *self = Self::Closed;
        Ok(())
    }

    fn begin_create(&mut self, draft: NewMember) -> Result<(), SessionError> {
        match self {
            Self::Creating(form) => form.begin(draft),
            _ => Err(SessionError::NotCreating),
        }
    }

    fn begin_edit(&mut self, id: &MemberId, patch: MemberPatch) -> Result<(), SessionError> {
        match self {
            Self::Editing { target, form } if target.id == *id => form.begin(patch),
            Self::Editing { target, .. } => Err(SessionError::TargetMismatch {
                expected: target.id.clone(),
                got: id.clone(),
            }),
            _ => Err(SessionError::NotEditing),
        }
    }

    fn fail(&mut self, message: String) {
        match self {
            Self::Closed => {}
            Self::Creating(form) => form.fail(message),
            Self::Editing { form, .. } => form.fail(message),
        }
    }

    fn ensure_closed(&self) -> Result<(), SessionError> {
        if self.is_open() {
            Err(SessionError::AlreadyOpen)
        } else {
            Ok(())
        }
    }
}

/// Proof that a submission was started from a specific session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    epoch: u64,
}

#[derive(Debug, Default)]
struct Slot {
    state: ModalSession,
    epoch: u64,
}

impl Slot {
    fn owns(&self, ticket: SubmitTicket) -> bool {
        self.epoch == ticket.epoch && self.state.is_open()
    }
}

/// Shared owner of the modal session.
#[derive(Debug, Default)]
pub struct SessionController {
    slot: Mutex<Slot>,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ModalSession {
        self.slot.lock().state.clone()
    }

    pub fn open_create(&self) -> Result<(), SessionError> {
        let mut slot = self.slot.lock();
        slot.state.open_create()?;
        slot.epoch += 1;
        debug!(epoch = slot.epoch, "Opened create session");
        Ok(())
    }

    pub fn open_edit(&self, target: Member) -> Result<(), SessionError> {
        let mut slot = self.slot.lock();
        let id = target.id.clone();
        slot.state.open_edit(target)?;
        slot.epoch += 1;
        debug!(epoch = slot.epoch, member_id = %id, "Opened edit session");
        Ok(())
    }

    pub fn cancel(&self) -> Result<(), SessionError> {
        let mut slot = self.slot.lock();
        slot.state.cancel()?;
        debug!(epoch = slot.epoch, "Session cancelled");
        Ok(())
    }

    pub(crate) fn begin_create(&self, draft: NewMember) -> Result<SubmitTicket, SessionError> {
        let mut slot = self.slot.lock();
        slot.state.begin_create(draft)?;
        Ok(SubmitTicket { epoch: slot.epoch })
    }

    pub(crate) fn begin_edit(
        &self,
        id: &MemberId,
        patch: MemberPatch,
    ) -> Result<SubmitTicket, SessionError> {
        let mut slot = self.slot.lock();
        slot.state.begin_edit(id, patch)?;
        Ok(SubmitTicket { epoch: slot.epoch })
    }

    /// Close the session the ticket belongs to. Returns false when the user
    /// already cancelled it (or moved on to another session).
    pub(crate) fn complete(&self, ticket: SubmitTicket) -> bool {
        let mut slot = self.slot.lock();
        if !slot.owns(ticket) {
            return false;
        }
        slot.state = ModalSession::Closed;
        true
    }

    /// Record a failure on the ticket's session and leave it open.
    pub(crate) fn fail(&self, ticket: SubmitTicket, message: impl Into<String>) -> bool {
        let mut slot = self.slot.lock();
        if !slot.owns(ticket) {
            return false;
        }
        slot.state.fail(message.into());
        true
    }
}

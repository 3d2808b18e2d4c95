//! Rendered surface handed to the presentation layer.

use crate::contract::model::{Member, MemberId, MemberPatch, NewMember, Role};
use crate::domain::session::{FormState, ModalSession};

/// Privileged "new member" affordance. Only constructed when the role gate permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateTrigger {
    pub label: &'static str,
}

impl CreateTrigger {
    pub(crate) fn new() -> Self {
        Self {
            label: "New member",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTrigger {
    pub member_id: MemberId,
}

/// One table row: name, email, role and actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub edit: EditTrigger,
}

impl From<&Member> for MemberRow {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id.clone(),
            name: m.name.clone(),
            email: m.email.clone(),
            role: m.role,
            edit: EditTrigger {
                member_id: m.id.clone(),
            },
        }
    }
}

/// Props for one modal component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalSlot {
    pub open: bool,
    /// Edit subject; always None for the create modal.
    pub target: Option<Member>,
    pub submitting: bool,
    pub error: Option<String>,
    /// Last submitted create input, used to refill the form after a failure.
    pub draft: Option<NewMember>,
    /// Last submitted edit input, used to refill the form after a failure.
    pub patch: Option<MemberPatch>,
}

impl ModalSlot {
    fn open<T>(form: &FormState<T>) -> Self {
        Self {
            open: true,
            submitting: form.submitting,
            error: form.error.clone(),
            ..Self::default()
        }
    }

    /// Split the session into (create, edit) slots; at most one is open.
    pub(crate) fn pair(session: &ModalSession) -> (Self, Self) {
        match session {
            ModalSession::Closed => (Self::default(), Self::default()),
            ModalSession::Creating(form) => {
                let create = Self {
                    draft: form.input.clone(),
                    ..Self::open(form)
                };
                (create, Self::default())
            }
            ModalSession::Editing { target, form } => {
                let edit = Self {
                    target: Some(target.clone()),
                    patch: form.input.clone(),
                    ..Self::open(form)
                };
                (Self::default(), edit)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRender {
    pub create_trigger: Option<CreateTrigger>,
    pub query: String,
    pub rows: Vec<MemberRow>,
    pub create_modal: ModalSlot,
    pub edit_modal: ModalSlot,
    pub fetch_error: Option<String>,
}

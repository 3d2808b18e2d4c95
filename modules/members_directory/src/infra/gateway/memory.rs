use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::contract::{
    client::DirectoryGateway,
    error::GatewayError,
    model::{Member, MemberId, MemberPatch, NewMember, Role},
};

/// Process-local backend used by `--mock` runs and tests.
///
/// Mirrors the server rules the view relies on: ids are assigned here, new
/// members get the `Member` role, and emails are unique.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryGateway {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    members: Vec<Member>,
    next_id: u64,
}

impl InMemoryDirectoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_members(members: Vec<Member>) -> Self {
        let next_id = members
            .iter()
            .filter_map(|m| m.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            state: Mutex::new(State { members, next_id }),
        }
    }

    /// Small directory for demos.
    pub fn seeded() -> Self {
        let seed = [
            ("Ana Silva", "ana@x.com", Role::Manager),
            ("Bruno Costa", "bruno@x.com", Role::Member),
            ("Carla Dias", "carla@x.com", Role::Member),
        ];
        Self::with_members(
            seed.iter()
                .zip(1u64..)
                .map(|((name, email, role), id)| Member {
                    id: MemberId::from(id),
                    name: (*name).to_string(),
                    email: (*email).to_string(),
                    role: *role,
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.state.lock().members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn email_taken(members: &[Member], email: &str, except: Option<&MemberId>) -> bool {
    members
        .iter()
        .any(|m| Some(&m.id) != except && m.email.eq_ignore_ascii_case(email))
}

#[async_trait]
impl DirectoryGateway for InMemoryDirectoryGateway {
    async fn list(&self) -> Result<Vec<Member>, GatewayError> {
        Ok(self.state.lock().members.clone())
    }

    async fn create(&self, draft: NewMember) -> Result<Member, GatewayError> {
        let mut state = self.state.lock();
        if email_taken(&state.members, &draft.email, None) {
            return Err(GatewayError::validation("email already registered"));
        }
        state.next_id += 1;
        let member = Member {
            id: MemberId::from(state.next_id),
            name: draft.name,
            email: draft.email,
            role: Role::Member,
        };
        state.members.push(member.clone());
        debug!(member_id = %member.id, "In-memory member created");
        Ok(member)
    }

    async fn update(&self, id: &MemberId, patch: MemberPatch) -> Result<Member, GatewayError> {
        let mut state = self.state.lock();
        if let Some(ref email) = patch.email {
            if email_taken(&state.members, email, Some(id)) {
                return Err(GatewayError::validation("email already registered"));
            }
        }
        let member = state
            .members
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| GatewayError::not_found(id.clone()))?;
        if let Some(name) = patch.name {
            member.name = name;
        }
        if let Some(email) = patch.email {
            member.email = email;
        }
        Ok(member.clone())
    }
}

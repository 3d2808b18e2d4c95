use std::fmt;

/// Server-assigned member identity. Opaque to the view: only compared and displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<u64> for MemberId {
    fn from(raw: u64) -> Self {
        Self(raw.to_string())
    }
}

/// Closed set of role classifications a member can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Manager,
    Member,
}

impl Role {
    pub const MANAGER_TAG: &'static str = "GERENTE";
    pub const MEMBER_TAG: &'static str = "MEMBRO";

    /// Canonical wire tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Manager => Self::MANAGER_TAG,
            Self::Member => Self::MEMBER_TAG,
        }
    }

    /// Parse a canonical tag. Only the exact tag matches: no trimming, no case folding.
    pub fn from_tag(raw: &str) -> Option<Self> {
        match raw {
            Self::MANAGER_TAG => Some(Self::Manager),
            Self::MEMBER_TAG => Some(Self::Member),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Pure member model as confirmed by the gateway (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Draft composed in the create modal. Identity and role are assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewMember {
    pub name: String,
    pub email: String,
}

/// Partial update data for a member
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl MemberPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

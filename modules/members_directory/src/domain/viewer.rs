use tracing::debug;

use crate::contract::model::Role;
use crate::domain::ports::RoleFlagStore;

/// Snapshot of who is looking at the directory, passed explicitly into the
/// role gate and the view instead of being read from ambient storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerContext {
    role_flag: Option<String>,
}

impl ViewerContext {
    pub fn new(role_flag: Option<String>) -> Self {
        Self { role_flag }
    }

    /// Viewer with no stored role.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_role(role: Role) -> Self {
        Self::new(Some(role.tag().to_string()))
    }

    /// Read the role flag once from `store`.
    pub fn load(store: &dyn RoleFlagStore, key: &str) -> Self {
        let role_flag = store.read(key);
        debug!(key, present = role_flag.is_some(), "Loaded viewer role flag");
        Self { role_flag }
    }

    pub fn role_flag(&self) -> Option<&str> {
        self.role_flag.as_deref()
    }

    /// Parsed role; absent or unrecognized flags yield None.
    pub fn role(&self) -> Option<Role> {
        self.role_flag.as_deref().and_then(Role::from_tag)
    }
}

use crate::contract::model::Role;
use crate::domain::viewer::ViewerContext;

/// Decides whether privileged affordances exist for a viewer. Fails closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGate {
    privileged: Role,
}

impl Default for RoleGate {
    fn default() -> Self {
        Self::new(Role::Manager)
    }
}

impl RoleGate {
    pub fn new(privileged: Role) -> Self {
        Self { privileged }
    }

    pub fn privileged(&self) -> Role {
        self.privileged
    }

    pub fn permits(&self, viewer: &ViewerContext) -> bool {
        viewer.role() == Some(self.privileged)
    }
}

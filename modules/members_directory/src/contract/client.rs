use async_trait::async_trait;

use crate::contract::{
    error::GatewayError,
    model::{Member, MemberId, MemberPatch, NewMember},
};

/// Backend operations the directory view consumes.
///
/// Implementations own transport concerns, including request timeouts.
#[async_trait]
pub trait DirectoryGateway: Send + Sync {
    /// Fetch the full member collection in server order.
    async fn list(&self) -> Result<Vec<Member>, GatewayError>;

    /// Create a member from a draft; the server assigns identity and role.
    async fn create(&self, draft: NewMember) -> Result<Member, GatewayError>;

    /// Apply a partial update to an existing member.
    async fn update(&self, id: &MemberId, patch: MemberPatch) -> Result<Member, GatewayError>;
}

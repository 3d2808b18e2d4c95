//! Backend JSON shapes. Field names follow the backend (`nome`, `tipoUsuario`).

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::contract::error::GatewayError;
use crate::contract::model::{Member, MemberId, MemberPatch, NewMember, Role};

/// Backend ids arrive either as numbers or strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for MemberId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => MemberId::from(n),
            RawId::Text(s) => MemberId::new(s),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoleDto {
    #[serde(rename = "GERENTE", alias = "MANAGER")]
    Manager,
    #[serde(rename = "MEMBRO", alias = "MEMBER")]
    Member,
}

impl From<RoleDto> for Role {
    fn from(r: RoleDto) -> Self {
        match r {
            RoleDto::Manager => Role::Manager,
            RoleDto::Member => Role::Member,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberDto {
    pub id: Option<RawId>,
    pub nome: String,
    pub email: String,
    #[serde(rename = "tipoUsuario")]
    pub tipo_usuario: RoleDto,
}

impl TryFrom<MemberDto> for Member {
    type Error = GatewayError;

    fn try_from(dto: MemberDto) -> Result<Self, Self::Error> {
        let id = dto
            .id
            .ok_or_else(|| GatewayError::decode("member record has no id"))?;
        Ok(Self {
            id: id.into(),
            name: dto.nome,
            email: dto.email,
            role: dto.tipo_usuario.into(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMemberReq {
    pub nome: String,
    pub email: String,
}

impl From<NewMember> for CreateMemberReq {
    fn from(draft: NewMember) -> Self {
        Self {
            nome: draft.name,
            email: draft.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct UpdateMemberReq {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<MemberPatch> for UpdateMemberReq {
    fn from(patch: MemberPatch) -> Self {
        Self {
            nome: patch.name,
            email: patch.email,
        }
    }
}

/// Decode a list payload record by record. A record that does not decode
/// (unknown role, missing id, wrong shape) is skipped with a warning so the
/// rest of the directory still renders.
pub fn members_from_records(records: Vec<serde_json::Value>) -> Vec<Member> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let decoded = serde_json::from_value::<MemberDto>(record)
                .map_err(|e| GatewayError::decode(e.to_string()))
                .and_then(Member::try_from);
            match decoded {
                Ok(member) => Some(member),
                Err(e) => {
                    warn!(index, error = %e, "Skipping undecodable member record");
                    None
                }
            }
        })
        .collect()
}

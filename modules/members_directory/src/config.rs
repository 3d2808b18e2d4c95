use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::contract::model::Role;

/// Name of this module's entry in the application `modules` bag.
pub const MODULE_NAME: &str = "members_directory";

/// Configuration for the members_directory module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MembersDirectoryConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Local storage key holding the viewer's role tag.
    #[serde(default = "default_role_flag_key")]
    pub role_flag_key: String,
    /// Role tag that unlocks member creation.
    #[serde(default = "default_privileged_role")]
    pub privileged_role: String,
    /// Local storage file, relative paths resolve against the client home_dir.
    #[serde(default = "default_storage_file")]
    pub storage_file: String,
}

impl Default for MembersDirectoryConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout: default_request_timeout(),
            role_flag_key: default_role_flag_key(),
            privileged_role: default_privileged_role(),
            storage_file: default_storage_file(),
        }
    }
}

impl MembersDirectoryConfig {
    /// Build from the raw module entry; a missing entry yields defaults.
    pub fn from_module_value(raw: Option<&serde_json::Value>) -> anyhow::Result<Self> {
        match raw {
            None => Ok(Self::default()),
            Some(value) => serde_json::from_value(value.clone())
                .with_context(|| format!("Invalid configuration for module '{MODULE_NAME}'")),
        }
    }

    pub fn api_base(&self) -> anyhow::Result<Url> {
        let url = Url::parse(self.api_base_url.trim())
            .with_context(|| format!("Invalid api_base_url '{}'", self.api_base_url))?;
        if url.cannot_be_a_base() {
            return Err(anyhow!("api_base_url '{}' cannot be a base URL", url));
        }
        Ok(url)
    }

    pub fn privileged(&self) -> anyhow::Result<Role> {
        Role::from_tag(&self.privileged_role)
            .ok_or_else(|| anyhow!("Unknown privileged_role '{}'", self.privileged_role))
    }

    pub fn storage_path(&self, home_dir: &Path) -> PathBuf {
        let p = Path::new(&self.storage_file);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            home_dir.join(p)
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_role_flag_key() -> String {
    "tipoUsuario".to_string()
}

fn default_privileged_role() -> String {
    Role::MANAGER_TAG.to_string()
}

fn default_storage_file() -> String {
    "local_storage.json".to_string()
}

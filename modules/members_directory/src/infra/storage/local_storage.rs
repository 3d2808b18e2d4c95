//! Client-local key/value storage holding the viewer's role flag.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::ports::RoleFlagStore;

/// JSON object file (`{"tipoUsuario": "GERENTE", ...}`) read on every lookup.
///
/// A missing file, malformed JSON or a non-string value all read as absent.
#[derive(Debug, Clone)]
pub struct FileRoleFlagStore {
    path: PathBuf,
}

impl FileRoleFlagStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RoleFlagStore for FileRoleFlagStore {
    fn read(&self, key: &str) -> Option<String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Local storage not readable");
                return None;
            }
        };
        let entries: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Local storage is not a JSON object");
                return None;
            }
        };
        entries.get(key)?.as_str().map(str::to_owned)
    }
}

/// Fixed in-memory storage.
#[derive(Debug, Clone, Default)]
pub struct StaticRoleFlagStore {
    values: HashMap<String, String>,
}

impl StaticRoleFlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl RoleFlagStore for StaticRoleFlagStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_string_value_under_key() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("local_storage.json");
        fs::write(&path, r#"{"tipoUsuario":"GERENTE","token":"abc"}"#).unwrap();

        let store = FileRoleFlagStore::new(&path);
        assert_eq!(store.read("tipoUsuario").as_deref(), Some("GERENTE"));
        assert_eq!(store.read("missing"), None);
    }

    #[test]
    fn absent_or_malformed_storage_reads_as_none() {
        let tmp = tempdir().unwrap();
        let missing = FileRoleFlagStore::new(tmp.path().join("nope.json"));
        assert_eq!(missing.read("tipoUsuario"), None);

        let garbage = tmp.path().join("garbage.json");
        fs::write(&garbage, "not json").unwrap();
        assert_eq!(FileRoleFlagStore::new(&garbage).read("tipoUsuario"), None);

        let array = tmp.path().join("array.json");
        fs::write(&array, r#"["GERENTE"]"#).unwrap();
        assert_eq!(FileRoleFlagStore::new(&array).read("tipoUsuario"), None);

        let number = tmp.path().join("number.json");
        fs::write(&number, r#"{"tipoUsuario": 1}"#).unwrap();
        assert_eq!(FileRoleFlagStore::new(&number).read("tipoUsuario"), None);
    }

    #[test]
    fn reflects_file_changes_on_next_read() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("local_storage.json");
        let store = FileRoleFlagStore::new(&path);

        fs::write(&path, r#"{"tipoUsuario":"MEMBRO"}"#).unwrap();
        assert_eq!(store.read("tipoUsuario").as_deref(), Some("MEMBRO"));
        fs::write(&path, r#"{"tipoUsuario":"GERENTE"}"#).unwrap();
        assert_eq!(store.read("tipoUsuario").as_deref(), Some("GERENTE"));
    }

    #[test]
    fn static_store() {
        let store = StaticRoleFlagStore::new().with("tipoUsuario", "MEMBRO");
        assert_eq!(store.read("tipoUsuario").as_deref(), Some("MEMBRO"));
        assert_eq!(store.read("other"), None);
    }
}

/// Output port: read-only access to client-local persistent storage.
///
/// The role flag is written elsewhere (login flow); this crate only reads it.
pub trait RoleFlagStore: Send + Sync {
    /// String value stored under `key`, or None when absent or unreadable.
    fn read(&self, key: &str) -> Option<String>;
}

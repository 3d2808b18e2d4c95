// === PUBLIC CONTRACT ===
// Model, gateway trait and errors shared with the presentation layer
pub mod contract;

pub use contract::{client, error, model};

pub mod config;
pub use config::MembersDirectoryConfig;

// === VIEW CORE ===
pub mod domain;
pub use domain::view::DirectoryView;

// === ADAPTERS ===
// HTTP gateway, in-memory gateway and local role flag storage.
pub mod infra;

pub mod gateway;
pub mod storage;

pub use gateway::{HttpDirectoryGateway, InMemoryDirectoryGateway};
pub use storage::{FileRoleFlagStore, StaticRoleFlagStore};

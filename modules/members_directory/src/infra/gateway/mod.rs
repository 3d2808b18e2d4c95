pub mod dto;
pub mod http;
pub mod memory;

pub use http::HttpDirectoryGateway;
pub use memory::InMemoryDirectoryGateway;

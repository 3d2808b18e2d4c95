pub mod collection;
pub mod coordinator;
pub mod error;
pub mod filter;
pub mod ports;
pub mod render;
pub mod role_gate;
pub mod session;
pub mod view;
pub mod viewer;

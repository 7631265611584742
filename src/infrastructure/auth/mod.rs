//! AuthService implementations.

pub mod memory;

pub use memory::InMemoryAuthService;

//! MessageStore implementations.
//!
//! - `memory`: in-memory append-only log
//! - eventually: a relational backend behind the same trait

pub mod memory;

pub use memory::InMemoryMessageStore;

//! Infrastructure layer: shared connection state, routing, and the
//! in-memory implementations of the domain capability traits.

pub mod auth;
pub mod dto;
pub mod registry;
pub mod router;
pub mod store;

pub use auth::InMemoryAuthService;
pub use registry::{ConnectionRegistry, OutboundSender};
pub use router::RoomRouter;
pub use store::InMemoryMessageStore;

//! Real-time chat service core.
//!
//! Session-authenticated WebSocket connections, a live presence registry,
//! room broadcast with private-message targeting, and a message
//! persistence/replay contract, built with Axum.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;

//! Use case error types.

use thiserror::Error;

use crate::domain::StoreError;

/// Connection handshake failures. Fatal for the connection: the transport
/// sends `unauthorized` and closes before any room join or message
/// processing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectError {
    #[error("handshake carried no valid session")]
    Unauthenticated,
}

/// Message dispatch failures.
///
/// `Unauthenticated` is normally unreachable from a valid connection
/// (enforced at handshake); `Store` is logged by the caller and the event
/// dropped, never surfaced to the sending client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("connection is not registered")]
    Unauthenticated,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Typing relay failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypingError {
    #[error("connection is not registered")]
    Unauthenticated,
}

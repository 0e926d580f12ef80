//! Shared domain types for the childcare center manager.
//!
//! Every entity stored by the backend, plus the request/response types the
//! services speak, lives here so the backend and any embedding UI agree on
//! one set of shapes. All types are serde-serializable; timestamps are
//! `chrono` types rather than strings so calling code never re-parses dates.

use std::fmt;

pub mod attendance;
pub mod billing;
pub mod children;
pub mod config;
pub mod contacts;
pub mod meals;
pub mod portal;

pub use attendance::*;
pub use billing::*;
pub use children::*;
pub use config::*;
pub use contacts::*;
pub use meals::*;
pub use portal::*;

/// Entity IDs are opaque strings in the shape "kind::epoch_millis", e.g.
/// "child::1702516122000". The store generates them; callers treat them as
/// opaque and only ever pass them back.
pub fn parse_entity_id(id: &str) -> Result<(&str, u64), EntityIdError> {
    let parts: Vec<&str> = id.split("::").collect();
    if parts.len() != 2 || parts[0].is_empty() {
        return Err(EntityIdError::InvalidFormat);
    }

    let millis = parts[1]
        .parse::<u64>()
        .map_err(|_| EntityIdError::InvalidTimestamp)?;

    Ok((parts[0], millis))
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for EntityIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityIdError::InvalidFormat => write!(f, "Invalid entity ID format"),
            EntityIdError::InvalidTimestamp => write!(f, "Invalid timestamp in entity ID"),
        }
    }
}

impl std::error::Error for EntityIdError {}

//! # Storage Module
//!
//! Storage abstraction for the portal-facing side of the backend.
//!
//! The domain services for center staff work on the store synchronously;
//! the parent portal instead goes through the async repository traits
//! defined here, so real persistence can later replace the in-memory
//! backend without touching portal code.
//!
//! ## Key Responsibilities
//!
//! - **Storage Abstraction**: One trait per entity kind, mirroring the
//!   store's permissive contract
//! - **Connection Management**: `MemoryConnection` owns one session's
//!   store and hands out repositories over it
//! - **Repository Pattern**: Domain code depends on the traits, never on
//!   the in-memory implementation directly

pub mod memory;
pub mod traits;

// Re-export the main types that other modules need
pub use memory::{
    AttendanceRepository, BankingRepository, ChildRepository, ContactRepository,
    InvoiceRepository, MemoryConnection,
};
pub use traits::{
    AttendanceStorage, BankingStorage, ChildProfileStorage, Connection, ContactStorage,
    InvoiceStorage,
};

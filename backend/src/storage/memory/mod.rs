//! In-memory storage backend.
//!
//! Each repository delegates to the session's `CenterStore` under the
//! connection's lock and resolves immediately. This is the backing used by
//! the parent portal; swapping in real persistence means implementing the
//! same traits over a durable connection.

pub mod attendance_repository;
pub mod banking_repository;
pub mod child_repository;
pub mod connection;
pub mod contact_repository;
pub mod invoice_repository;

pub use attendance_repository::AttendanceRepository;
pub use banking_repository::BankingRepository;
pub use child_repository::ChildRepository;
pub use connection::MemoryConnection;
pub use contact_repository::ContactRepository;
pub use invoice_repository::InvoiceRepository;

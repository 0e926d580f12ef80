//! # Domain Module
//!
//! Contains all business logic for the care center application.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how enrollment, billing, attendance, and meal planning are
//! modeled and managed. It operates independently of any specific UI
//! framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **store**: The in-memory entity store every service works against
//! - **linker**: Child-to-parent link maintenance on the store
//! - **billing**: Invoice transitions and payment application on the store
//! - **views**: Pure read-model functions recomputed from store state
//! - **enrollment_service**: Child and contact CRUD plus family links
//! - **billing_service**: Banking info, invoices, and payment intake
//! - **attendance_service**: Daily check-in/out and meal participation
//! - **meal_service**: Meal template CRUD and the grocery catalog
//! - **portal_service**: Parent-facing facade over the storage traits
//!
//! ## Key Responsibilities
//!
//! - **Entity Management**: Creating, validating, and patching center records
//! - **Family Links**: Keeping child and guardian references consistent
//! - **Billing Rules**: Enforcing the invoice status transitions
//! - **Derived Views**: Computing rosters, balances, and headcounts on demand
//! - **Service Layer**: Providing high-level operations for the application

pub mod attendance_service;
pub mod billing_service;
pub mod enrollment_service;
pub mod meal_service;
pub mod portal_service;
pub mod store;
pub mod views;

mod billing;
mod linker;

pub use attendance_service::*;
pub use billing_service::*;
pub use enrollment_service::*;
pub use meal_service::*;
pub use portal_service::*;
pub use store::*;

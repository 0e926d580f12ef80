//! # Care Center Backend
//!
//! Contains all non-UI logic for the care center application.
//!
//! This crate serves as the orchestration layer that brings together:
//! - **Domain**: Business logic and rules for running the center
//! - **Storage**: The storage abstraction and its in-memory backend
//! - **Fixtures**: Preset reference data for the kitchen
//!
//! The backend is designed to be UI-agnostic, meaning it could support
//! different frontend frameworks or even CLI interfaces without
//! modification.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! UI Layer (staff app, parent portal)
//!     ↓
//! Domain Layer (services, derived views)
//!     ↓
//! Storage Layer (entity store, repositories)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Initialize and configure the application state
//! - Coordinate between domain logic and the storage backend
//! - Provide a clean separation of concerns for maintainability

pub mod domain;
pub mod fixtures;
pub mod storage;

use anyhow::Result;
use log::info;
use shared::CenterConfig;

use crate::domain::{AttendanceService, BillingService, EnrollmentService, MealPlanningService};
use crate::storage::memory::MemoryConnection;

pub use domain::*;
pub use storage::*;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub enrollment: EnrollmentService,
    pub billing: BillingService,
    pub attendance: AttendanceService,
    pub meal_planning: MealPlanningService,
    pub connection: MemoryConnection,
}

/// Initialize the backend with all required services
pub fn initialize_backend() -> Result<AppState> {
    initialize_backend_with_config(CenterConfig::default())
}

/// Initialize the backend against an explicit center configuration. Each
/// call builds a fresh store so sessions stay isolated.
pub fn initialize_backend_with_config(config: CenterConfig) -> Result<AppState> {
    info!("Setting up storage");
    let connection = MemoryConnection::with_config(config);

    info!("Setting up domain model");
    let enrollment = EnrollmentService::new(connection.clone());
    let billing = BillingService::new(connection.clone());
    let attendance = AttendanceService::new(connection.clone());
    let meal_planning = MealPlanningService::new(connection.clone());

    info!("Setting up application state");
    let app_state = AppState {
        enrollment,
        billing,
        attendance,
        meal_planning,
        connection,
    };

    Ok(app_state)
}

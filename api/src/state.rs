//! Application state shared across Axum route handlers.

use sea_orm::DatabaseConnection;
use services::attendance::AttendanceService;

/// Central application state: the database connection pool and the attendance
/// engine constructed around it. Cloned into each handler by the `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    attendance: AttendanceService,
}

impl AppState {
    pub fn new(db: DatabaseConnection, attendance: AttendanceService) -> Self {
        Self { db, attendance }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns the attendance engine.
    pub fn attendance(&self) -> &AttendanceService {
        &self.attendance
    }
}

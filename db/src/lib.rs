pub mod models;
pub mod password;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection};
use std::path::Path;

/// Connects to the database given a DSN or a bare SQLite file path.
///
/// A connection failure here is fatal: the process cannot do anything useful
/// without its store, so we terminate immediately rather than retry.
pub async fn connect(path_or_url: &str) -> DatabaseConnection {
    // If it's already a DSN, use it as-is; otherwise treat it as a SQLite file path.
    let url = if path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
    {
        path_or_url.to_owned()
    } else {
        // Ensure parent directory exists (SQLite won't create intermediate dirs).
        if let Some(parent) = Path::new(path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    };

    let db = Database::connect(&url)
        .await
        .expect("Failed to connect to database");
    log::info!("Database connection established");
    db
}

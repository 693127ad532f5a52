use crate::seed::Seeder;
use db::models::{class_session, timetable_slot};
use sea_orm::{DatabaseConnection, DbErr};

/// Provisions a zero-state session row for every class code any timetable
/// references. `provision` is insert-if-absent, so re-running never
/// duplicates or resets live state.
pub struct ClassSessionSeeder;

#[async_trait::async_trait]
impl Seeder for ClassSessionSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        for code in timetable_slot::Model::distinct_codes(db).await? {
            class_session::Model::provision(db, &code).await?;
        }
        Ok(())
    }
}

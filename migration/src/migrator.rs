use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202508110001_create_users::Migration),
            Box::new(migrations::m202508110002_create_timetable_slots::Migration),
            Box::new(migrations::m202508110003_create_class_sessions::Migration),
            Box::new(migrations::m202509020001_add_attendance_tracking::Migration),
        ]
    }
}

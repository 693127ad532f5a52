use crate::seed::Seeder;
use db::models::user::{Model, Role};
use sea_orm::{DatabaseConnection, DbErr};

/// Default demo credential; real deployments re-provision with per-user
/// passwords.
const DEFAULT_PASSWORD: &str = "12345";

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let fixtures: [(Role, &str, &str); 3] = [
            (Role::Student, "101", "Priya Sharma"),
            (Role::Student, "102", "Rahul Verma"),
            (Role::Teacher, "201", "Anil Mehta"),
        ];

        for (role, user_id, name) in fixtures {
            if Model::find_by_identity(db, role, user_id).await?.is_none() {
                Model::create(db, role, user_id, name, DEFAULT_PASSWORD, Some("cse-sem5"))
                    .await?;
            }
        }
        Ok(())
    }
}

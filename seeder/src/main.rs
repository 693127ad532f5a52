use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    class_session::ClassSessionSeeder, timetable::TimetableSeeder, user::UserSeeder,
};
use std::env;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let url = env::var("DATABASE_URL")
        .or_else(|_| env::var("DATABASE_PATH"))
        .expect("DATABASE_URL or DATABASE_PATH must be set");
    let db = db::connect(&url).await;

    // Sessions last: they provision zero-state rows for every code the
    // timetable seeder created.
    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(TimetableSeeder), "Timetable"),
        (Box::new(ClassSessionSeeder), "ClassSession"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}

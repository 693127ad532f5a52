use crate::seed::Seeder;
use db::models::timetable_slot::{DayOfWeek, Model};
use sea_orm::{DatabaseConnection, DbErr};

const TIMETABLE_ID: &str = "cse-sem5";

/// The demo `cse-sem5` timetable: the same three morning slots Monday to
/// Friday.
pub struct TimetableSeeder;

#[async_trait::async_trait]
impl Seeder for TimetableSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        // Re-running the seeder must not duplicate slots.
        if !Model::distinct_codes(db).await?.is_empty() {
            return Ok(());
        }

        let weekdays = [
            DayOfWeek::Monday,
            DayOfWeek::Tuesday,
            DayOfWeek::Wednesday,
            DayOfWeek::Thursday,
            DayOfWeek::Friday,
        ];
        let slots: [(&str, &str, &str, &str, &str); 3] = [
            ("CS501", "Distributed Systems", "Block A-101", "09:00", "10:00"),
            ("CS502", "Operating Systems", "Block A-102", "10:00", "11:00"),
            ("CS503", "Computer Networks", "Block B-201", "11:15", "12:15"),
        ];

        for day in weekdays {
            for (position, (code, subject, venue, start, end)) in slots.into_iter().enumerate() {
                Model::create(
                    db,
                    TIMETABLE_ID,
                    day,
                    position as i32,
                    code,
                    subject,
                    Some(venue),
                    start,
                    end,
                )
                .await?;
            }
        }
        Ok(())
    }
}

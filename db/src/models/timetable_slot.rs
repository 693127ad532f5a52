use sea_orm::entity::prelude::*;
use sea_orm::{
    DatabaseConnection, DbErr, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::Serialize;

/// Day names match the long weekday form the timetables are authored in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum DayOfWeek {
    #[sea_orm(string_value = "Monday")]
    Monday,
    #[sea_orm(string_value = "Tuesday")]
    Tuesday,
    #[sea_orm(string_value = "Wednesday")]
    Wednesday,
    #[sea_orm(string_value = "Thursday")]
    Thursday,
    #[sea_orm(string_value = "Friday")]
    Friday,
    #[sea_orm(string_value = "Saturday")]
    Saturday,
    #[sea_orm(string_value = "Sunday")]
    Sunday,
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// One scheduled class slot inside a named weekly timetable.
///
/// Static reference data, owned by provisioning. `position` gives the in-day
/// ordering; `start_time`/`end_time` are zero-padded 24-hour "HH:MM" strings,
/// compared lexicographically. Class codes key the flat session table and are
/// NOT guaranteed unique across timetables: two timetables sharing a code
/// share live session state.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "timetable_slots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub timetable_id: String,
    pub day: DayOfWeek,
    pub position: i32,
    pub code: String,
    pub subject: String,
    pub venue: Option<String>,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DatabaseConnection,
        timetable_id: &str,
        day: DayOfWeek,
        position: i32,
        code: &str,
        subject: &str,
        venue: Option<&str>,
        start_time: &str,
        end_time: &str,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            timetable_id: Set(timetable_id.to_owned()),
            day: Set(day),
            position: Set(position),
            code: Set(code.to_owned()),
            subject: Set(subject.to_owned()),
            venue: Set(venue.map(|v| v.to_owned())),
            start_time: Set(start_time.to_owned()),
            end_time: Set(end_time.to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Today's slots for one timetable, in in-day order.
    pub async fn for_day(
        db: &DatabaseConnection,
        timetable_id: &str,
        day: DayOfWeek,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::TimetableId.eq(timetable_id))
            .filter(Column::Day.eq(day))
            .order_by_asc(Column::Position)
            .all(db)
            .await
    }

    /// Whether any timetable anywhere references this class code. Session
    /// start is refused for codes no timetable knows about.
    pub async fn code_exists(db: &DatabaseConnection, code: &str) -> Result<bool, DbErr> {
        let n = Entity::find()
            .filter(Column::Code.eq(code))
            .count(db)
            .await?;
        Ok(n > 0)
    }

    /// Every class code referenced by any timetable, for zero-state session
    /// provisioning.
    pub async fn distinct_codes(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
        Entity::find()
            .select_only()
            .column(Column::Code)
            .distinct()
            .into_tuple::<String>()
            .all(db)
            .await
    }
}

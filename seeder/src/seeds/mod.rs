pub mod class_session;
pub mod timetable;
pub mod user;

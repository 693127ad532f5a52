pub mod attendance_entry;
pub mod class_session;
pub mod timetable_slot;
pub mod user;

pub mod m202508110001_create_users;
pub mod m202508110002_create_timetable_slots;
pub mod m202508110003_create_class_sessions;
pub mod m202509020001_add_attendance_tracking;

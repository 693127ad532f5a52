pub mod attendance;
pub mod error;
pub mod schedule;

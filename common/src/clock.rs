use chrono::{DateTime, FixedOffset, Timelike, Utc, Weekday};

// Offsets beyond +/-23:59 are not representable; clamp rather than panic so a
// bad env value degrades to the nearest valid offset.
const MAX_OFFSET_MINUTES: i32 = 23 * 60 + 59;

/// Current wall-clock time in the configured local timezone, expressed as a
/// fixed offset in minutes east of UTC.
pub fn local_now(offset_minutes: i32) -> DateTime<FixedOffset> {
    let seconds = offset_minutes.clamp(-MAX_OFFSET_MINUTES, MAX_OFFSET_MINUTES) * 60;
    let offset = FixedOffset::east_opt(seconds).expect("offset clamped to valid range");
    Utc::now().with_timezone(&offset)
}

/// Local weekday for schedule resolution.
pub fn current_weekday(offset_minutes: i32) -> Weekday {
    use chrono::Datelike;
    local_now(offset_minutes).weekday()
}

/// Local time-of-day as a zero-padded 24-hour "HH:MM" string. Safe for
/// lexicographic comparison against timetable slot boundaries.
pub fn current_hhmm(offset_minutes: i32) -> String {
    let now = local_now(offset_minutes);
    format!("{:02}:{:02}", now.hour(), now.minute())
}

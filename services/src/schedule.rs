//! Resolves a user's weekly timetable into today's class list, annotated with
//! liveness and attendance flags.
//!
//! Resolution is recomputed fresh on every call: "now" moves continuously and
//! nothing here is cacheable. Session and mark state for all of today's codes
//! is fetched in bulk (one query each) and joined in memory.

use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryFilter};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use common::clock;
use db::models::{attendance_entry, class_session, timetable_slot, user};

use crate::error::AttendanceError;

/// One of today's classes, annotated for the requesting user's role.
///
/// `present_count` is attached for teachers, `is_marked` for students; the
/// other field is omitted from the wire form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedSlot {
    pub code: String,
    pub subject: String,
    pub venue: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub live: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub present_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_marked: Option<bool>,
}

/// Half-open slot window check: `start <= now < end`. All three are
/// zero-padded 24-hour "HH:MM" strings, so plain string comparison is exact.
pub fn in_window(now: &str, start: &str, end: &str) -> bool {
    start <= now && now < end
}

/// Annotates today's slots against current session state.
///
/// Teacher liveness is the time window alone (the teacher needs the "open
/// session" affordance even before opening, and again after a restartable
/// session lapsed). Student liveness additionally requires the teacher to
/// have opened the session.
pub fn annotate(
    slots: &[timetable_slot::Model],
    sessions: &HashMap<String, class_session::Model>,
    marked: &HashSet<String>,
    role: user::Role,
    now: &str,
) -> Vec<AnnotatedSlot> {
    slots
        .iter()
        .map(|slot| {
            let session = sessions.get(&slot.code);
            let time_correct = in_window(now, &slot.start_time, &slot.end_time);

            let (live, present_count, is_marked) = match role {
                user::Role::Teacher => {
                    let count = session.map(|s| s.present_count).unwrap_or(0);
                    (time_correct, Some(count), None)
                }
                user::Role::Student => {
                    let active = session.map(|s| s.active).unwrap_or(false);
                    (
                        time_correct && active,
                        None,
                        Some(marked.contains(&slot.code)),
                    )
                }
            };

            AnnotatedSlot {
                code: slot.code.clone(),
                subject: slot.subject.clone(),
                venue: slot.venue.clone(),
                start_time: slot.start_time.clone(),
                end_time: slot.end_time.clone(),
                live,
                present_count,
                is_marked,
            }
        })
        .collect()
}

/// Resolves today's annotated schedule for a user. A user with no assigned
/// timetable gets an empty schedule.
pub async fn resolve_today(
    db: &DatabaseConnection,
    user: &user::Model,
    tz_offset_minutes: i32,
) -> Result<Vec<AnnotatedSlot>, AttendanceError> {
    let Some(timetable_id) = user.timetable_id.as_deref() else {
        return Ok(Vec::new());
    };

    let day = timetable_slot::DayOfWeek::from(clock::current_weekday(tz_offset_minutes));
    let now = clock::current_hhmm(tz_offset_minutes);

    let slots = timetable_slot::Model::for_day(db, timetable_id, day).await?;
    let codes: Vec<String> = slots.iter().map(|s| s.code.clone()).collect();

    let sessions: HashMap<String, class_session::Model> = if codes.is_empty() {
        HashMap::new()
    } else {
        class_session::Entity::find()
            .filter(class_session::Column::Code.is_in(codes.iter().cloned()))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.code.clone(), s))
            .collect()
    };

    let marked = match user.role {
        user::Role::Student => {
            attendance_entry::Model::marked_codes_for_student(db, &codes, &user.user_id).await?
        }
        user::Role::Teacher => HashSet::new(),
    };

    Ok(annotate(&slots, &sessions, &marked, user.role, &now))
}

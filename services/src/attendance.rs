//! The attendance engine: session start, location verification, attendance
//! marking, roster retrieval, and the two authentication-shaped entry points
//! that also resolve today's schedule.
//!
//! The engine owns no state beyond its injected store handle and
//! configuration; every per-class invariant lives in the store operations it
//! composes.

use log::{info, warn};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use common::clock;
use common::geo::{self, Coordinate};
use db::models::user::{self, Role};
use db::models::{attendance_entry, class_session, timetable_slot};

use crate::error::AttendanceError;
use crate::schedule::{self, AnnotatedSlot};

pub use db::models::attendance_entry::MarkOutcome;

/// A user as returned to clients: the credential digest is stripped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub role: Role,
    pub user_id: String,
    pub name: String,
    pub timetable_id: Option<String>,
}

impl From<&user::Model> for UserProfile {
    fn from(u: &user::Model) -> Self {
        Self {
            role: u.role,
            user_id: u.user_id.clone(),
            name: u.name.clone(),
            timetable_id: u.timetable_id.clone(),
        }
    }
}

/// One roster line: a present student with display name and arrival stamp.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub user_id: String,
    pub name: String,
    pub time: String,
}

/// Successful login or refresh payload: the profile plus today's annotated
/// schedule.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub user: UserProfile,
    pub schedule: Vec<AnnotatedSlot>,
}

/// The attendance engine. Cheap to clone; holds the injected store handle,
/// the geofence radius, and the timezone offset used for all schedule
/// resolution and arrival stamps.
#[derive(Clone)]
pub struct AttendanceService {
    db: DatabaseConnection,
    radius_m: f64,
    tz_offset_minutes: i32,
}

impl AttendanceService {
    pub fn new(db: DatabaseConnection, radius_m: f64, tz_offset_minutes: i32) -> Self {
        Self {
            db,
            radius_m,
            tz_offset_minutes,
        }
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Authenticates a user and resolves today's schedule.
    ///
    /// Unknown user and wrong password both map to the same generic
    /// `InvalidCredentials`, never revealing which half failed.
    pub async fn login(
        &self,
        role: Role,
        user_id: &str,
        password: &str,
    ) -> Result<UserDetails, AttendanceError> {
        let Some(user) = user::Model::find_by_identity(&self.db, role, user_id).await? else {
            warn!("Login failed for unknown {role} {user_id}");
            return Err(AttendanceError::InvalidCredentials);
        };

        if user.password_hash.is_none() {
            return Err(AttendanceError::MissingCredential);
        }
        if !user.verify_credentials(password) {
            warn!("Login failed for {role} {user_id}: bad password");
            return Err(AttendanceError::InvalidCredentials);
        }

        let schedule = schedule::resolve_today(&self.db, &user, self.tz_offset_minutes).await?;
        info!("{role} {user_id} logged in");
        Ok(UserDetails {
            user: UserProfile::from(&user),
            schedule,
        })
    }

    /// Re-resolves a known user's details and schedule without a credential
    /// check. The schedule must be recomputed every time: liveness depends on
    /// the clock and on sessions other requests have opened since login.
    pub async fn refresh(&self, role: Role, user_id: &str) -> Result<UserDetails, AttendanceError> {
        let Some(user) = user::Model::find_by_identity(&self.db, role, user_id).await? else {
            return Err(AttendanceError::NotFound("User not found.".into()));
        };

        let schedule = schedule::resolve_today(&self.db, &user, self.tz_offset_minutes).await?;
        Ok(UserDetails {
            user: UserProfile::from(&user),
            schedule,
        })
    }

    /// Opens (or re-opens) the session for a class, anchored at the teacher's
    /// reported location. Always resets attendance to a fresh state and
    /// deactivates every other class's session.
    pub async fn start_session(
        &self,
        class_code: &str,
        anchor: Coordinate,
    ) -> Result<class_session::Model, AttendanceError> {
        if !anchor.is_finite() {
            return Err(AttendanceError::Validation(
                "Coordinates must be finite numbers.".into(),
            ));
        }

        if !timetable_slot::Model::code_exists(&self.db, class_code).await? {
            return Err(AttendanceError::NotFound(format!(
                "Unknown class code: {class_code}"
            )));
        }

        let session = class_session::Model::open(&self.db, class_code, anchor).await?;
        info!("Session started for {class_code}. Attendance reset.");
        Ok(session)
    }

    /// Checks a student's reported location against the session anchor.
    ///
    /// Returns the measured distance on success. Verification is a separate
    /// call from marking; marking does not re-check the geofence.
    pub async fn verify_location(
        &self,
        class_code: &str,
        coords: Coordinate,
    ) -> Result<f64, AttendanceError> {
        if !coords.is_finite() {
            return Err(AttendanceError::Validation(
                "Coordinates must be finite numbers.".into(),
            ));
        }

        let session = class_session::Model::find_by_code(&self.db, class_code).await?;
        let Some(anchor) = session.as_ref().and_then(|s| s.anchor()) else {
            return Err(AttendanceError::SessionNotOpen);
        };

        let distance = geo::distance_meters(anchor, coords);
        if distance <= self.radius_m {
            Ok(distance)
        } else {
            warn!(
                "Location mismatch for {class_code}: {:.0}m away (radius {:.0}m)",
                distance, self.radius_m
            );
            Err(AttendanceError::LocationMismatch {
                meters: distance.round() as i64,
            })
        }
    }

    /// Marks a student present for a class. Idempotent: the duplicate case is
    /// a success outcome, never an error. Trusts that the client verified its
    /// location first; the `active` flag gates the student UI, not this call.
    pub async fn mark_attendance(
        &self,
        class_code: &str,
        student_id: &str,
    ) -> Result<MarkOutcome, AttendanceError> {
        if class_session::Model::find_by_code(&self.db, class_code)
            .await?
            .is_none()
        {
            return Err(AttendanceError::NotFound(format!(
                "Unknown class code: {class_code}"
            )));
        }

        let marked_at = clock::current_hhmm(self.tz_offset_minutes);
        let outcome =
            attendance_entry::Model::mark(&self.db, class_code, student_id, &marked_at).await?;
        match outcome {
            MarkOutcome::Marked => info!("Attendance marked for {student_id} in {class_code}"),
            MarkOutcome::AlreadyMarked => {
                info!("Attendance was already marked for {student_id} in {class_code}")
            }
        }
        Ok(outcome)
    }

    /// The present-student list for a class in arrival order, display names
    /// resolved against the user directory. Unknown student ids get a
    /// placeholder name rather than failing the whole roster.
    pub async fn roster(&self, class_code: &str) -> Result<Vec<RosterEntry>, AttendanceError> {
        let entries = attendance_entry::Model::for_class(&self.db, class_code).await?;
        let ids: Vec<String> = entries.iter().map(|e| e.student_id.clone()).collect();
        let names = user::Model::names_by_ids(&self.db, &ids).await?;

        Ok(entries
            .into_iter()
            .map(|entry| {
                let name = names
                    .get(&entry.student_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown Student".to_owned());
                RosterEntry {
                    user_id: entry.student_id,
                    name,
                    time: entry.marked_at,
                }
            })
            .collect())
    }
}

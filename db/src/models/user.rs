use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, DbErr, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::password;

/// Account role. Student and teacher numbers come from different registries,
/// so identity is the (role, user_id) pair, not the id alone.
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
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "teacher")]
    Teacher,
}

/// Represents a user in the `users` table.
///
/// Created and mutated only by provisioning (seeder); never deleted at
/// runtime. `password_hash` is nullable because accounts may predate the
/// credential backfill pass, and `timetable_id` is nullable because a user
/// with no assigned timetable simply resolves to an empty schedule.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub role: Role,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub name: String,
    pub password_hash: Option<String>,
    pub timetable_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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
    /// Creates a user with a freshly hashed credential.
    pub async fn create(
        db: &DatabaseConnection,
        role: Role,
        user_id: &str,
        name: &str,
        password: &str,
        timetable_id: Option<&str>,
    ) -> Result<Model, DbErr> {
        let password_hash = password::hash_password(password)
            .map_err(|e| DbErr::Custom(format!("Failed to hash password: {e}")))?;
        let now = Utc::now();

        ActiveModel {
            role: Set(role),
            user_id: Set(user_id.to_owned()),
            name: Set(name.to_owned()),
            password_hash: Set(Some(password_hash)),
            timetable_id: Set(timetable_id.map(|t| t.to_owned())),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
    }

    /// Creates a user with no credential set, as left behind by provisioning
    /// runs that predate the password backfill.
    pub async fn create_without_credential(
        db: &DatabaseConnection,
        role: Role,
        user_id: &str,
        name: &str,
        timetable_id: Option<&str>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        ActiveModel {
            role: Set(role),
            user_id: Set(user_id.to_owned()),
            name: Set(name.to_owned()),
            password_hash: Set(None),
            timetable_id: Set(timetable_id.map(|t| t.to_owned())),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
    }

    pub async fn find_by_identity(
        db: &DatabaseConnection,
        role: Role,
        user_id: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id((role, user_id.to_owned())).one(db).await
    }

    /// Verifies a plaintext password against this user's digest. A user
    /// without a digest never verifies; callers that need to distinguish that
    /// case check `password_hash` first.
    pub fn verify_credentials(&self, password: &str) -> bool {
        self.password_hash
            .as_deref()
            .map(|digest| password::verify_password(password, digest))
            .unwrap_or(false)
    }

    /// Resolves student ids to display names in one query, for roster joins.
    /// Ids with no matching user are simply absent from the map.
    pub async fn names_by_ids(
        db: &DatabaseConnection,
        user_ids: &[String],
    ) -> Result<HashMap<String, String>, DbErr> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = Entity::find()
            .filter(Column::Role.eq(Role::Student))
            .filter(Column::UserId.is_in(user_ids.iter().cloned()))
            .all(db)
            .await?;

        Ok(users.into_iter().map(|u| (u.user_id, u.name)).collect())
    }
}
